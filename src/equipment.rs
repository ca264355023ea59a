use crate::catalog::ItemCatalog;
use crate::creature::CreatureInst;
use crate::errors::{EquipmentError, GameResult};
use crate::trainer::Trainer;
use schema::{GearSlot, ItemId};

/// Equip an inventory item into one of the creature's three gear slots.
///
/// The item must exist in the catalog, be held in the trainer's inventory,
/// be gear, and declare the requested slot. Violations surface as typed
/// errors rather than silent no-ops. A previously equipped item is returned
/// to the inventory, not discarded.
pub fn equip(
    trainer: &mut Trainer,
    creature: &mut CreatureInst,
    slot: GearSlot,
    item_id: &str,
    items: &ItemCatalog,
) -> GameResult<()> {
    let def = items
        .get(item_id)
        .ok_or_else(|| EquipmentError::UnknownItem(item_id.to_string()))?;

    if !trainer.has_item(item_id) {
        return Err(EquipmentError::NotInInventory(item_id.to_string()).into());
    }
    if !def.is_gear() {
        return Err(EquipmentError::NotGear(item_id.to_string()).into());
    }
    if def.slot != Some(slot) {
        return Err(EquipmentError::SlotMismatch {
            item: item_id.to_string(),
            declared: def.slot,
            requested: slot,
        }
        .into());
    }

    trainer.remove_item(item_id);
    if let Some(previous) = creature.equipment.insert(slot, item_id.to_string()) {
        trainer.add_item(previous);
    }
    Ok(())
}

/// Remove the item in the given slot and return it to the inventory.
pub fn unequip(
    trainer: &mut Trainer,
    creature: &mut CreatureInst,
    slot: GearSlot,
) -> GameResult<ItemId> {
    let item_id = creature
        .equipment
        .remove(&slot)
        .ok_or(EquipmentError::SlotEmpty(slot))?;
    trainer.add_item(item_id.clone());
    Ok(item_id)
}
