use std::io::{self, BufRead, Write};

use stockroom_core::config::AppConfig;
use stockroom_core::{Catalog, Product, ProductUpdate};
use stockroom_store::FileStore;
use tracing::warn;

/// One interactive sitting with the catalog: load on start, menu loop until
/// save-and-exit. Generic over its console streams so tests can script a
/// whole session in memory.
pub struct Session<R, W> {
    config: AppConfig,
    store: FileStore,
    catalog: Catalog,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: AppConfig, store: FileStore, input: R, output: W) -> Self {
        Self { config, store, catalog: Catalog::default(), input, output }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.load_catalog()?;

        match self.menu_loop() {
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                warn!("input stream closed before save-and-exit");
                writeln!(self.output, "Input closed. Exiting without saving.")?;
                Ok(())
            }
            other => other,
        }
    }

    /// Lenient by design: a missing file starts fresh, a broken file is
    /// reported and the session continues with whatever was recovered.
    fn load_catalog(&mut self) -> io::Result<()> {
        match self.store.load() {
            Ok(report) => {
                for record in &report.skipped {
                    writeln!(
                        self.output,
                        "Warning: skipped catalog entry `{}`: {}",
                        record.key, record.reason
                    )?;
                }
                self.catalog = report.catalog;
            }
            Err(error) => {
                warn!(%error, "catalog load failed");
                writeln!(self.output, "Error loading data: {error}")?;
                writeln!(self.output, "Starting with an empty catalog.")?;
            }
        }
        Ok(())
    }

    fn menu_loop(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "===== INVENTORY MANAGEMENT SYSTEM =====")?;
            writeln!(self.output, "1. Add Product")?;
            writeln!(self.output, "2. View Products")?;
            writeln!(self.output, "3. Search Product")?;
            writeln!(self.output, "4. Update Product")?;
            writeln!(self.output, "5. Delete Product")?;
            writeln!(self.output, "6. Stock In / Out")?;
            writeln!(self.output, "7. Save & Exit")?;

            let choice = self.prompt("Enter choice: ")?;
            match choice.trim() {
                "1" => self.handle_add()?,
                "2" => self.handle_view()?,
                "3" => self.handle_search()?,
                "4" => self.handle_update()?,
                "5" => self.handle_delete()?,
                "6" => self.handle_stock()?,
                "7" => {
                    self.handle_save_and_exit()?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn handle_add(&mut self) -> io::Result<()> {
        let product_id = self.prompt("Enter Product ID: ")?;
        let product_id = product_id.trim().to_string();
        if self.catalog.contains(&product_id) {
            writeln!(self.output, "Error: a product with id `{product_id}` already exists")?;
            return Ok(());
        }

        let name = self.prompt("Enter Product Name: ")?;
        let raw_quantity = self.prompt("Enter Quantity: ")?;
        let Some(quantity) = self.parse_quantity(&raw_quantity)? else {
            return Ok(());
        };
        let raw_price = self.prompt("Enter Price: ")?;
        let Some(price) = self.parse_price(&raw_price)? else {
            return Ok(());
        };

        let outcome = Product::new(product_id, name, quantity, price)
            .and_then(|product| self.catalog.insert(product));
        match outcome {
            Ok(()) => writeln!(self.output, "Product added."),
            Err(error) => writeln!(self.output, "Error: {error}"),
        }
    }

    fn handle_view(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            return writeln!(self.output, "No products available.");
        }

        let threshold = self.config.inventory.low_stock_threshold;
        let mut lines = Vec::new();
        for product in self.catalog.iter() {
            lines.push(render_product(product));
            if product.quantity <= threshold {
                lines.push(format!("   LOW STOCK ALERT (at or below {threshold})"));
            }
        }
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn handle_search(&mut self) -> io::Result<()> {
        let query = self.prompt("Enter product name to search: ")?;

        let rendered: Vec<String> =
            self.catalog.search(query.trim()).into_iter().map(render_product).collect();
        if rendered.is_empty() {
            return writeln!(self.output, "Product not found.");
        }
        for line in rendered {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn handle_update(&mut self) -> io::Result<()> {
        let product_id = self.prompt("Enter Product ID to update: ")?;
        let product_id = product_id.trim().to_string();
        if !self.catalog.contains(&product_id) {
            writeln!(self.output, "Error: no product with id `{product_id}` exists in the catalog")?;
            return Ok(());
        }

        let name = self.prompt("New Name (leave empty to keep current): ")?;
        let name = {
            let trimmed = name.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        let raw_quantity = self.prompt("New Quantity: ")?;
        let Some(quantity) = self.parse_quantity(&raw_quantity)? else {
            return Ok(());
        };
        let raw_price = self.prompt("New Price: ")?;
        let Some(price) = self.parse_price(&raw_price)? else {
            return Ok(());
        };

        match self.catalog.update(&product_id, ProductUpdate { name, quantity, price }) {
            Ok(()) => writeln!(self.output, "Product updated."),
            Err(error) => writeln!(self.output, "Error: {error}"),
        }
    }

    fn handle_delete(&mut self) -> io::Result<()> {
        let product_id = self.prompt("Enter Product ID to delete: ")?;

        match self.catalog.remove(product_id.trim()) {
            Ok(_) => writeln!(self.output, "Product deleted."),
            Err(error) => writeln!(self.output, "Error: {error}"),
        }
    }

    fn handle_stock(&mut self) -> io::Result<()> {
        let product_id = self.prompt("Enter Product ID: ")?;
        let product_id = product_id.trim().to_string();
        if !self.catalog.contains(&product_id) {
            writeln!(self.output, "Error: no product with id `{product_id}` exists in the catalog")?;
            return Ok(());
        }

        writeln!(self.output, "1. Stock In")?;
        writeln!(self.output, "2. Stock Out")?;
        let direction = self.prompt("Choose: ")?;
        let raw_amount = self.prompt("Enter quantity: ")?;
        let Some(amount) = self.parse_quantity(&raw_amount)? else {
            return Ok(());
        };

        let outcome = match direction.trim() {
            "1" => self.catalog.stock_in(&product_id, amount),
            "2" => self.catalog.stock_out(&product_id, amount),
            _ => return writeln!(self.output, "Invalid choice."),
        };
        match outcome {
            Ok(quantity) => writeln!(self.output, "Stock updated. New quantity: {quantity}"),
            Err(error) => writeln!(self.output, "Error: {error}"),
        }
    }

    fn handle_save_and_exit(&mut self) -> io::Result<()> {
        match self.store.save(&self.catalog) {
            Ok(()) => writeln!(self.output, "Data saved successfully.")?,
            Err(error) => {
                warn!(%error, "catalog save failed");
                writeln!(self.output, "Error saving data: {error}")?;
            }
        }
        writeln!(self.output, "Exiting application.")
    }

    /// Writes the prompt, then reads one answer line. A closed input stream
    /// surfaces as `UnexpectedEof`, which `run` turns into a clean exit.
    fn prompt(&mut self, text: &str) -> io::Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        if bytes == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input stream closed"));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn parse_quantity(&mut self, raw: &str) -> io::Result<Option<u32>> {
        match raw.trim().parse::<u32>() {
            Ok(quantity) => Ok(Some(quantity)),
            Err(_) => {
                writeln!(
                    self.output,
                    "Error: quantity must be a non-negative whole number (got `{}`)",
                    raw.trim()
                )?;
                Ok(None)
            }
        }
    }

    fn parse_price(&mut self, raw: &str) -> io::Result<Option<f64>> {
        match raw.trim().parse::<f64>() {
            Ok(price) => Ok(Some(price)),
            Err(_) => {
                writeln!(self.output, "Error: price must be a number (got `{}`)", raw.trim())?;
                Ok(None)
            }
        }
    }
}

fn render_product(product: &Product) -> String {
    format!(
        "ID: {} | Name: {} | Qty: {} | Price: {:.2}",
        product.product_id, product.name, product.quantity, product.price
    )
}
