//! Example: Save records to an xlsx file and query them back

use mini_sheets::prelude::*;

#[derive(Debug, Default)]
struct Product {
    name: String,
    price: f64,
    in_stock: bool,
}

impl_record!(Product {
    name,
    price,
    in_stock
});

fn main() -> XlsxResult<()> {
    let products = vec![
        Product {
            name: "Item 1".into(),
            price: 100.0,
            in_stock: true,
        },
        Product {
            name: "Item 2".into(),
            price: 249.5,
            in_stock: false,
        },
    ];

    let path = std::env::temp_dir().join("mini-sheets-products.xlsx");
    if path.exists() {
        std::fs::remove_file(&path)?;
    }

    // Save the file
    products.save_as(&path)?;
    println!("Created {}", path.display());

    // Read the rows back as untyped maps
    for row in mini_sheets::query_rows(&path, &ReadOptions::with_header_row())? {
        let cells: Vec<String> = row
            .iter()
            .map(|(key, value)| format!("{}={}", key, value.unwrap_or("")))
            .collect();
        println!("{}", cells.join(", "));
    }

    // And as typed records
    let back: Vec<Product> = mini_sheets::query(&path)?;
    println!("\nRead {} products: {:?}", back.len(), back);

    Ok(())
}
