//! The storefront state container.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use terroa_auth::{Credentials, SessionStore, User};
use terroa_cache::{Cache, DurableRecord, KvStore};
use terroa_commerce::cart::{cart_total, Cart, CartPricing, PricingMode, WholesaleMinimum};
use terroa_commerce::catalog::{AdjustmentReason, CatalogProvider, InventoryAdjustment, Product};
use terroa_commerce::checkout::{
    CheckoutContext, CheckoutFlow, CheckoutRequest, CheckoutState, MockSettlement, Order,
    OrderLedger, OrderStatus, Settlement,
};
use terroa_commerce::ids::{OrderId, ProductId};
use terroa_commerce::search::CatalogQuery;
use terroa_commerce::{CommerceError, Currency, Money};

use crate::config::StorefrontConfig;
use crate::dashboard::{customer_directory, CustomerSummary, DashboardSummary};
use crate::error::StorefrontError;
use crate::events::StoreEvent;
use crate::settings::{CompanySettings, SETTINGS_KEY};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything one storefront session knows: catalog, cart, pricing mode,
/// signed-in user, orders and company settings.
///
/// Mutations take `&mut self`. Placing an order holds that borrow until
/// settlement finishes, so the cart cannot change while payment is in
/// flight.
pub struct Storefront {
    catalog: Box<dyn CatalogProvider>,
    currency: Currency,
    mode: PricingMode,
    cart: Cart,
    session: SessionStore,
    ledger: OrderLedger,
    settings: CompanySettings,
    settings_record: DurableRecord<CompanySettings>,
    checkout: CheckoutFlow,
    minimum: WholesaleMinimum,
    low_stock_threshold: u32,
    events: broadcast::Sender<StoreEvent>,
}

impl Storefront {
    /// Build a storefront over a durable store, restoring the signed-in
    /// user and the company settings saved by a previous run.
    ///
    /// Missing or unreadable records fall back to signed out and default
    /// settings. Fails if any catalog product is priced in a currency other
    /// than the configured one.
    pub fn open(
        config: &StorefrontConfig,
        store: Arc<dyn KvStore>,
        catalog: impl CatalogProvider + 'static,
    ) -> Result<Self, StorefrontError> {
        let minimum = config
            .wholesale_minimum()
            .map_err(|e| CommerceError::InvalidAmount(format!("{e:#}")))?;
        if let Some(product) = catalog
            .list_products()
            .iter()
            .find(|p| p.currency() != config.currency)
        {
            return Err(CommerceError::CurrencyMismatch {
                expected: config.currency.code().to_string(),
                got: product.currency().code().to_string(),
            }
            .into());
        }
        let cache = Cache::new(store);

        let mut session = SessionStore::new(cache.clone(), config.login_policy());
        session.rehydrate();

        let settings_record = DurableRecord::new(cache, SETTINGS_KEY);
        let settings = settings_record.load().unwrap_or_else(|| {
            debug!("using default company settings");
            CompanySettings::default()
        });

        let settlement = Arc::new(MockSettlement::new(config.settlement_latency()));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        info!(
            products = catalog.list_products().len(),
            signed_in = session.is_authenticated(),
            "storefront opened"
        );

        Ok(Self {
            catalog: Box::new(catalog),
            currency: config.currency,
            mode: PricingMode::default(),
            cart: Cart::new(config.currency),
            session,
            ledger: OrderLedger::new(),
            settings,
            settings_record,
            checkout: CheckoutFlow::new(settlement),
            minimum,
            low_stock_threshold: config.low_stock_threshold,
            events,
        })
    }

    /// Replace the settlement provider.
    ///
    /// Existing checkout subscribers stop receiving transitions.
    pub fn with_settlement(mut self, settlement: Arc<dyn Settlement>) -> Self {
        self.checkout = CheckoutFlow::new(settlement);
        self
    }

    // --- Observers ---

    /// Receive store events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Receive checkout state transitions from now on.
    pub fn subscribe_checkout(&self) -> broadcast::Receiver<CheckoutState> {
        self.checkout.subscribe()
    }

    fn emit(&self, event: StoreEvent) {
        debug!(event = event.name(), "store event");
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }

    fn emit_cart_changed(&self) {
        self.emit(StoreEvent::CartChanged {
            item_count: self.cart.item_count(),
        });
    }

    // --- Catalog ---

    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.catalog.as_ref()
    }

    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        self.catalog.search(query)
    }

    // --- Pricing ---

    pub fn pricing_mode(&self) -> PricingMode {
        self.mode
    }

    /// Switch price lists. Cart contents are unchanged; only totals move.
    pub fn set_pricing_mode(&mut self, mode: PricingMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        info!(%mode, "pricing mode changed");
        self.emit(StoreEvent::PricingModeChanged { mode });
    }

    pub fn wholesale_minimum(&self) -> &WholesaleMinimum {
        &self.minimum
    }

    // --- Cart ---

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart total under the current pricing mode.
    pub fn cart_total(&self) -> Result<Money, StorefrontError> {
        Ok(cart_total(&self.cart, self.mode)?)
    }

    pub fn cart_pricing(&self) -> Result<CartPricing, StorefrontError> {
        Ok(CartPricing::calculate(&self.cart, self.mode)?)
    }

    /// Amount still needed to reach the wholesale minimum, if any.
    pub fn wholesale_shortfall(&self) -> Option<Money> {
        let total = self.cart_total().ok()?;
        self.minimum.shortfall(&total, self.mode)
    }

    /// Add units of a catalog product. Returns the quantity now in the cart,
    /// clamped to stock.
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<u32, StorefrontError> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        let before = self.cart.get_line(product_id).map_or(0, |l| l.quantity);
        let now = self.cart.add_item(product, quantity);
        if before != now {
            self.emit_cart_changed();
        }
        Ok(now)
    }

    /// Set a line's quantity; zero or less removes it. Returns the
    /// resulting quantity.
    pub fn update_cart_quantity(&mut self, product_id: &ProductId, quantity: i64) -> u32 {
        let before = self.cart.get_line(product_id).map_or(0, |l| l.quantity);
        let now = self.cart.update_quantity(product_id, quantity);
        if before != now {
            self.emit_cart_changed();
        }
        now
    }

    /// Remove a line. Removing a product that is not in the cart is a no-op.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        if self.cart.remove_item(product_id) {
            self.emit_cart_changed();
        }
    }

    pub fn clear_cart(&mut self) {
        if !self.cart.is_empty() {
            self.cart.clear();
            self.emit_cart_changed();
        }
    }

    // --- Session ---

    pub fn current_user(&self) -> Option<&User> {
        self.session.current()
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<&User, StorefrontError> {
        self.session.login(credentials)?;
        self.emit_session_changed();
        self.session
            .current()
            .ok_or(StorefrontError::Auth(terroa_auth::AuthError::NotAuthenticated))
    }

    /// One-click administrator login.
    pub fn login_as_admin(&mut self) -> Result<&User, StorefrontError> {
        self.session.login_as_admin()?;
        self.emit_session_changed();
        self.session
            .current()
            .ok_or(StorefrontError::Auth(terroa_auth::AuthError::NotAuthenticated))
    }

    /// Sign out. The cart is kept.
    pub fn logout(&mut self) -> Result<(), StorefrontError> {
        if self.session.logout()?.is_some() {
            self.emit_session_changed();
        }
        Ok(())
    }

    fn emit_session_changed(&self) {
        let user = self.session.current();
        self.emit(StoreEvent::SessionChanged {
            user_id: user.map(|u| u.id.clone()),
            role: user.map(|u| u.role),
        });
    }

    // --- Checkout & orders ---

    pub fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    /// Check whether an order could be placed right now.
    pub fn can_checkout(&self) -> Result<(), StorefrontError> {
        self.checkout.check_preconditions(
            &self.cart,
            self.session.is_authenticated(),
            self.mode,
            &self.minimum,
        )?;
        Ok(())
    }

    /// Validate, settle and record an order for the current cart.
    ///
    /// On success the order is at the front of the ledger with status
    /// `Received` and the cart is empty. A missing delivery address leaves
    /// cart and ledger unchanged.
    pub async fn place_order(
        &mut self,
        request: CheckoutRequest,
    ) -> Result<Order, StorefrontError> {
        let ctx = CheckoutContext {
            cart: &mut self.cart,
            ledger: &mut self.ledger,
            customer: self.session.current().map(User::as_customer),
            mode: self.mode,
            minimum: self.minimum,
        };
        let order = self.checkout.submit(ctx, request).await?;
        for line in &order.lines {
            self.catalog.record_sale(&line.product_id, line.quantity);
        }

        self.emit(StoreEvent::OrderPlaced {
            order_id: order.id.clone(),
            total: order.total,
        });
        self.emit_cart_changed();
        Ok(order)
    }

    /// Orders visible to the current user: all of them for the
    /// administrator, their own for a customer, none when signed out.
    pub fn user_orders(&self) -> Vec<&Order> {
        match self.session.current() {
            Some(user) if user.is_admin() => self.ledger.all().iter().collect(),
            Some(user) => self.ledger.for_user(&user.id),
            None => Vec::new(),
        }
    }

    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.ledger.get(id)
    }

    /// Move an order along its status progression. Admin only.
    pub fn update_order_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), StorefrontError> {
        self.session.require_admin()?;
        let from = self.ledger.update_status(id, status)?;
        if from != status {
            self.emit(StoreEvent::OrderStatusChanged {
                order_id: id.clone(),
                from,
                to: status,
            });
        }
        Ok(())
    }

    // --- Inventory (admin) ---

    /// Overwrite a product's stock. Admin only.
    pub fn set_stock(
        &mut self,
        product_id: &ProductId,
        stock: u32,
    ) -> Result<InventoryAdjustment, StorefrontError> {
        self.session.require_admin()?;
        let adjustment = self.catalog.set_stock(product_id, stock)?;
        self.after_stock_change(&adjustment);
        Ok(adjustment)
    }

    /// Apply a signed stock change, saturating at zero. Admin only.
    pub fn adjust_stock(
        &mut self,
        product_id: &ProductId,
        delta: i64,
        reason: AdjustmentReason,
    ) -> Result<InventoryAdjustment, StorefrontError> {
        self.session.require_admin()?;
        let adjustment = self.catalog.adjust_stock(product_id, delta, reason)?;
        self.after_stock_change(&adjustment);
        Ok(adjustment)
    }

    fn after_stock_change(&mut self, adjustment: &InventoryAdjustment) {
        info!(
            product_id = %adjustment.product_id,
            previous = adjustment.previous,
            current = adjustment.current,
            reason = adjustment.reason.as_str(),
            "stock adjusted"
        );
        let cart_changed = match self.catalog.get(&adjustment.product_id) {
            Some(product) => self.cart.refresh_product(product),
            None => false,
        };
        self.emit(StoreEvent::StockChanged {
            adjustment: adjustment.clone(),
        });
        if cart_changed {
            self.emit_cart_changed();
        }
    }

    // --- Settings ---

    pub fn settings(&self) -> &CompanySettings {
        &self.settings
    }

    /// Replace and persist the company settings. Admin only.
    pub fn update_settings(&mut self, settings: CompanySettings) -> Result<(), StorefrontError> {
        self.session.require_admin()?;
        settings
            .validate()
            .map_err(StorefrontError::InvalidSettings)?;
        if let Err(e) = self.settings_record.save(&settings) {
            warn!(error = %e, "failed to persist company settings");
            return Err(e.into());
        }
        self.settings = settings;
        info!(name = %self.settings.name, "company settings updated");
        self.emit(StoreEvent::SettingsChanged);
        Ok(())
    }

    // --- Dashboard (admin) ---

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    /// Sales and inventory summary. Admin only.
    pub fn dashboard(&self) -> Result<DashboardSummary, StorefrontError> {
        self.session.require_admin()?;
        Ok(DashboardSummary::compute(
            &self.ledger,
            self.catalog.as_ref(),
            self.currency,
            self.low_stock_threshold,
        )?)
    }

    /// Customers who have ordered, filtered by business name or CNPJ.
    /// Admin only.
    pub fn customers(&self, search: &str) -> Result<Vec<CustomerSummary>, StorefrontError> {
        self.session.require_admin()?;
        Ok(customer_directory(&self.ledger, self.currency, search)?)
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("mode", &self.mode)
            .field("cart", &self.cart)
            .field("user", &self.session.current().map(|u| &u.id))
            .field("orders", &self.ledger.len())
            .field("checkout", &self.checkout.state())
            .finish_non_exhaustive()
    }
}
