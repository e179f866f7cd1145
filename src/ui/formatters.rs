use colored::Colorize;

use crate::core::product::{ProductMetadata, VariantAvailability, VariantSnapshot};

/// Width of the size column in `check` output
const SIZE_WIDTH: usize = 8;

/// One row of the stock table: size, then the display count colored by level
pub fn format_variant_row(variant: &VariantAvailability) -> String {
    let stock = variant.stock_display();
    let stock = if !variant.is_in_stock() {
        stock.dimmed()
    } else if stock.ends_with('+') {
        stock.green().bold()
    } else {
        stock.yellow()
    };

    format!("  {:<width$} {}", variant.size, stock, width = SIZE_WIDTH)
}

/// Short "N of M sizes in stock" summary
pub fn format_summary(snapshot: &VariantSnapshot) -> String {
    if snapshot.is_empty() {
        return "No sizes listed".to_string();
    }

    format!(
        "{} of {} sizes in stock",
        snapshot.in_stock().len(),
        snapshot.len()
    )
}

pub fn format_metadata(metadata: &ProductMetadata) -> String {
    let mut out = format!("{} {}  ${}", metadata.title, metadata.color, metadata.price);
    if let Some(image) = &metadata.image_url {
        out.push_str(&format!("\n  {}", image));
    }
    out
}

pub fn print_snapshot(snapshot: &VariantSnapshot) {
    println!("  {:<width$} {}", "Size".bold(), "Stock".bold(), width = SIZE_WIDTH);
    for variant in snapshot.variants() {
        println!("{}", format_variant_row(variant));
    }
    println!();
    println!("{}", format_summary(snapshot).dimmed());
}
