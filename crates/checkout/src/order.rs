use storefront_core::{
    CustomerId, DomainError, DomainResult, Entity, OrderId, OrderItemId, ProductId,
};

/// Order line: product snapshot (name, unit price) and quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    id: OrderItemId,
    name: String,
    /// Unit price in smallest currency unit (e.g., cents).
    price: u64,
    product_id: ProductId,
    quantity: u32,
}

impl OrderItem {
    pub fn new(
        id: OrderItemId,
        name: impl Into<String>,
        price: u64,
        product_id: ProductId,
        quantity: u32,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        let item = Self {
            id,
            name: name.into(),
            price,
            product_id,
            quantity,
        };
        item.checked_total()
            .ok_or_else(|| DomainError::validation("item total overflows"))?;
        Ok(item)
    }

    pub fn id(&self) -> &OrderItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity`.
    pub fn total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }

    fn checked_total(&self) -> Option<u64> {
        self.price.checked_mul(u64::from(self.quantity))
    }
}

/// Entity: Order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
}

impl Order {
    /// Create an order; it must contain at least one item.
    pub fn new(id: OrderId, customer_id: CustomerId, items: Vec<OrderItem>) -> DomainResult<Self> {
        ensure_items(&items)?;
        Ok(Self {
            id,
            customer_id,
            items,
        })
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Sum of the item totals.
    pub fn total(&self) -> u64 {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Replace the items; on error the order keeps its current items.
    pub fn change_items(&mut self, items: Vec<OrderItem>) -> DomainResult<()> {
        ensure_items(&items)?;
        self.items = items;
        Ok(())
    }
}

fn ensure_items(items: &[OrderItem]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::validation("items are required"));
    }
    items
        .iter()
        .try_fold(0u64, |acc, item| acc.checked_add(item.checked_total()?))
        .ok_or_else(|| DomainError::validation("order total overflows"))?;
    Ok(())
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
