//! Collect item attributes from command-line flags and interactive prompts.

use stockroom_core::storage::NewItem;

use crate::cli::ItemFields;
use crate::errors::CliError;
use crate::ui::format::format_decimal;
use crate::ui::{prompt, print_error, UiContext};

use super::parsing::{non_empty, parse_price};

/// Overlay every attribute given on the command line onto `item`.
///
/// An empty string clears an optional attribute.
pub fn apply_fields(item: &mut NewItem, fields: &ItemFields) -> anyhow::Result<()> {
    if let Some(ref name) = fields.name {
        item.name = name.trim().to_string();
    }
    if let Some(ref category) = fields.category {
        item.category = non_empty(Some(category));
    }
    if let Some(quantity) = fields.quantity {
        item.quantity = quantity;
    }
    if let Some(ref price) = fields.price {
        item.unit_price = match non_empty(Some(price)) {
            Some(value) => Some(parse_price(&value)?),
            None => None,
        };
    }
    if let Some(ref supplier) = fields.supplier {
        item.supplier = non_empty(Some(supplier));
    }
    if let Some(ref contact) = fields.supplier_contact {
        item.supplier_contact = non_empty(Some(contact));
    }
    if let Some(minimum) = fields.minimum_stock {
        item.minimum_stock = minimum;
    }
    if let Some(ref barcode) = fields.barcode {
        item.barcode = non_empty(Some(barcode));
    }
    if let Some(ref location) = fields.location {
        item.location = non_empty(Some(location));
    }
    Ok(())
}

/// Prompt for every attribute, starting from `base`.
pub fn prompt_item(ui: &UiContext, base: &NewItem) -> anyhow::Result<NewItem> {
    let initial_name = (!base.name.is_empty()).then_some(base.name.as_str());
    Ok(NewItem {
        name: prompt::text(ui, "Item name", initial_name)?,
        category: prompt::optional_text(ui, "Category", base.category.as_deref())?,
        quantity: prompt::parsed(ui, "Quantity", Some(base.quantity.to_string()))?,
        unit_price: prompt_price(ui, base)?,
        supplier: prompt::optional_text(ui, "Supplier", base.supplier.as_deref())?,
        supplier_contact: prompt::optional_text(
            ui,
            "Supplier contact",
            base.supplier_contact.as_deref(),
        )?,
        minimum_stock: prompt::parsed(ui, "Minimum stock", Some(base.minimum_stock.to_string()))?,
        barcode: prompt::optional_text(ui, "Barcode", base.barcode.as_deref())?,
        location: prompt::optional_text(ui, "Location", base.location.as_deref())?,
    })
}

fn prompt_price(ui: &UiContext, base: &NewItem) -> anyhow::Result<Option<rust_decimal::Decimal>> {
    let initial = format_decimal(base.unit_price);
    let initial = (!initial.is_empty()).then_some(initial.as_str());
    loop {
        match prompt::optional_text(ui, "Unit price", initial)? {
            None => return Ok(None),
            Some(value) => match parse_price(&value) {
                Ok(price) => return Ok(Some(price)),
                Err(err) => print_error(ui, &err.to_string(), None),
            },
        }
    }
}

/// Build the item for `add`.
///
/// With no flags on a terminal every attribute is prompted; otherwise only
/// a missing name is prompted for. A blank name is rejected before the
/// store is involved.
pub fn new_item_from_fields(
    ui: &UiContext,
    fields: &ItemFields,
    interactive: bool,
) -> anyhow::Result<NewItem> {
    if interactive && !fields.any() {
        return prompt_item(ui, &NewItem::default());
    }

    let mut item = NewItem::default();
    apply_fields(&mut item, fields)?;
    if item.name.is_empty() && interactive {
        item.name = prompt::text(ui, "Item name", None)?;
    }
    require_name(&item)?;
    Ok(item)
}

/// Build the replacement for `update` from the existing item.
pub fn updated_item_from_fields(
    ui: &UiContext,
    existing: NewItem,
    fields: &ItemFields,
    interactive: bool,
) -> anyhow::Result<NewItem> {
    let item = if fields.any() {
        let mut item = existing;
        apply_fields(&mut item, fields)?;
        item
    } else if interactive {
        prompt_item(ui, &existing)?
    } else {
        return Err(CliError::invalid_input(
            "Nothing to update; pass at least one field flag (e.g. --quantity 5)",
        )
        .into());
    };
    require_name(&item)?;
    Ok(item)
}

fn require_name(item: &NewItem) -> anyhow::Result<()> {
    if item.name.trim().is_empty() {
        return Err(CliError::invalid_input("Item name is required").into());
    }
    Ok(())
}
