use campkitchen_core::DomainResult;
use campkitchen_events::EventBus;
use campkitchen_kitchen::{InMemoryKitchen, KitchenEvent};
use campkitchen_recipients::{Recipient, SpecialNeeds};
use campkitchen_stock::StockItem;

/// Demo stock and households so a fresh shell has something to work with.
pub fn seed_demo_data<B>(engine: &mut InMemoryKitchen<B>) -> DomainResult<()>
where
    B: EventBus<KitchenEvent>,
{
    engine.add_stock_item(StockItem::staple("Rice", 100.0)?)?;
    engine.add_stock_item(StockItem::protein("Chicken", 50.0)?)?;
    engine.add_stock_item(StockItem::vegetable("Water Spinach", 30.0)?)?;

    engine.register_recipient(Recipient::new("Budi Santoso", "KRB-001", SpecialNeeds::General, 4)?)?;
    engine.register_recipient(Recipient::new("Siti Aminah", "KRB-002", SpecialNeeds::Elderly, 2)?)?;
    engine.register_recipient(Recipient::new("Ahmad Yani", "KRB-003", SpecialNeeds::Infant, 3)?)?;

    tracing::info!(
        available_portions = engine.compute_available_portions(),
        "demo data loaded"
    );
    Ok(())
}
