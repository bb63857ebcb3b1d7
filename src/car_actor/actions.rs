/// Custom actions for Car entities.
///
/// These are the stock operations checkout and cancellation rely on,
/// beyond the standard CRUD operations.
#[derive(Debug, Clone)]
pub enum CarAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Reserves a specified amount of stock.
    ///
    /// # Errors
    /// Will fail if the requested amount exceeds available stock.
    ReserveStock(u32),
    /// Returns previously reserved stock to the lot.
    ReleaseStock(u32),
}

/// Results from CarActions - variants match 1:1 with CarAction
#[derive(Debug, Clone)]
pub enum CarActionResult {
    StockLevel(u32),
    Reserved,
    Released(u32),
}
