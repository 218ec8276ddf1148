//! Line arithmetic. Every mutation keeps `0 <= quantity <= cap`.
//!
//! Index-based edits return `false` when the index is out of range and
//! leave the lines untouched.

use crate::service::ScannedProduct;
use crate::state::{ScrapLine, ScrapLines};

fn clamp(value: f64, cap: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, cap)
    }
}

impl ScrapLine {
    /// New line from a scan, quantity capped at the stock on hand.
    pub fn from_scan(p: &ScannedProduct) -> Self {
        let mut line = Self {
            product_id: p.product_id,
            product_name: p.product_name.clone(),
            quantity: 0.0,
            uom: p.product_uom.clone().unwrap_or_default(),
            product_uom_id: p.product_uom_id,
            unit_price: p.unit_price,
            barcode_type: p.barcode_type,
            image_url: p.image_url.clone(),
            tracking: p.tracking,
            qty_available: p.qty_available,
        };
        line.quantity = clamp(p.quantity, line.cap());
        line
    }

    fn set_clamped(&mut self, value: f64) {
        self.quantity = clamp(value, self.cap());
    }
}

impl ScrapLines {
    /// Add a scan: bump the existing line for the product or append a new
    /// one. Returns the index of the affected line.
    ///
    /// An existing line keeps the stock snapshot from its first scan.
    pub fn merge_scan(&mut self, product: &ScannedProduct) -> usize {
        match self.items.iter().position(|l| l.product_id == product.product_id) {
            Some(index) => {
                let line = &mut self.items[index];
                let next = line.quantity + product.quantity;
                line.set_clamped(next);
                index
            }
            None => {
                self.items.push(ScrapLine::from_scan(product));
                self.items.len() - 1
            }
        }
    }

    /// Manual edit. Non-finite or non-positive values are ignored.
    pub fn set_quantity(&mut self, index: usize, value: f64) -> bool {
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };
        if value.is_finite() && value > 0.0 {
            line.set_clamped(value);
        }
        true
    }

    pub fn increment(&mut self, index: usize) -> bool {
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };
        let next = line.quantity + 1.0;
        line.set_clamped(next);
        true
    }

    /// Decrement by one, or remove the line when it is at 1 or below.
    pub fn decrement(&mut self, index: usize) -> bool {
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };
        if line.quantity > 1.0 {
            let next = line.quantity - 1.0;
            line.set_clamped(next);
            true
        } else {
            self.remove(index)
        }
    }

    /// Set the quantity to everything on hand.
    pub fn scrap_all(&mut self, index: usize) -> bool {
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };
        line.quantity = line.cap();
        true
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }
}
