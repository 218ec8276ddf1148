//! Dashboard translations: English and Czech.
//!
//! Keys live under `scrap/`. Counted messages take `?count=N`.

use std::collections::HashMap;
use std::sync::Arc;

use openerp_flux::{I18nHandler, I18nStore, QueryParams};

// Notice keys used by the handlers.
pub const BARCODE_ERROR_TITLE: &str = "scrap/notice/barcode_error";
pub const PRODUCT_NOT_FOUND: &str = "scrap/notice/product_not_found";
pub const SCAN_FAILED: &str = "scrap/notice/scan_failed";
pub const NO_LINES: &str = "scrap/notice/no_lines";
pub const CREATE_FAILED: &str = "scrap/notice/create_failed";
pub const LOAD_FAILED: &str = "scrap/notice/load_failed";
pub const ADJUST_FAILED: &str = "scrap/notice/adjust_failed";
pub const CREATED: &str = "scrap/notice/created";
pub const SCAN_DISCARDED: &str = "scrap/notice/scan_discarded";
pub const SCAN_PENDING: &str = "scrap/notice/scan_pending";

/// Register all dashboard translations.
pub fn register_all(i18n: &I18nStore) {
    i18n.handle("scrap/#", Arc::new(ScrapStrings::new()));
}

const EN: usize = 0;
const CS: usize = 1;

fn locale_index(locale: &str) -> usize {
    match locale {
        "cs" | "cs_CZ" | "cs-CZ" => CS,
        _ => EN,
    }
}

// ── Static strings ──

struct ScrapStrings {
    data: HashMap<&'static str, [&'static str; 2]>, // [en, cs]
}

impl ScrapStrings {
    fn new() -> Self {
        let mut m = HashMap::new();

        // Notices
        m.insert(BARCODE_ERROR_TITLE, ["Barcode Error", "Chyba čárového kódu"]);
        m.insert(PRODUCT_NOT_FOUND, ["Product not found", "Produkt nenalezen"]);
        m.insert(SCAN_FAILED, ["Error scanning barcode", "Chyba při skenování čárového kódu"]);
        m.insert(NO_LINES, ["No products to scrap", "Žádné produkty k vyřazení"]);
        m.insert(CREATE_FAILED, ["Error creating scrap orders", "Chyba při vytváření příkazů k vyřazení"]);
        m.insert(LOAD_FAILED, ["Could not load scrap settings", "Nastavení vyřazení se nepodařilo načíst"]);
        m.insert(SCAN_DISCARDED, ["Scan discarded: the dashboard is no longer scanning", "Sken zahozen: přehled už neskenuje"]);
        m.insert(SCAN_PENDING, ["Wait for the barcode to be resolved", "Počkejte na vyhodnocení čárového kódu"]);
        m.insert(ADJUST_FAILED, ["Could not open inventory adjustment", "Úpravu zásob se nepodařilo otevřít"]);

        // Scanning view
        m.insert("scrap/ui/title", ["Scrap Dashboard", "Vyřazení zboží"]);
        m.insert("scrap/ui/scan_hint", ["Scan a product barcode", "Naskenujte čárový kód produktu"]);
        m.insert("scrap/ui/reason", ["Scrap reason", "Důvod vyřazení"]);
        m.insert("scrap/ui/no_reason", ["No reason", "Bez důvodu"]);
        m.insert("scrap/ui/total_value", ["Total value", "Celková hodnota"]);
        m.insert("scrap/ui/total_items", ["Products", "Produkty"]);
        m.insert("scrap/ui/available", ["available", "skladem"]);
        m.insert("scrap/ui/loading", ["Working...", "Zpracovávám..."]);

        // Confirmation
        m.insert("scrap/ui/confirm_title", ["Confirm scrap", "Potvrdit vyřazení"]);
        m.insert("scrap/ui/confirm", ["Confirm", "Potvrdit"]);
        m.insert("scrap/ui/cancel", ["Cancel", "Zrušit"]);

        // Result
        m.insert("scrap/ui/result_title", ["Scrap orders created", "Příkazy k vyřazení vytvořeny"]);
        m.insert("scrap/ui/stock_after", ["Stock after scrap", "Stav zásob po vyřazení"]);
        m.insert("scrap/ui/skipped", ["Skipped (no stock)", "Přeskočeno (bez zásob)"]);
        m.insert("scrap/ui/new_session", ["New session", "Nová relace"]);

        Self { data: m }
    }
}

impl I18nHandler for ScrapStrings {
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String {
        let idx = locale_index(locale);
        if let Some(text) = counted(path, query, idx) {
            return text;
        }
        self.data
            .get(path)
            .map(|t| t[idx].to_string())
            .unwrap_or_else(|| path.to_string())
    }
}

// ── Counted strings ──

fn counted(path: &str, query: &QueryParams, idx: usize) -> Option<String> {
    let count = query.get("count").unwrap_or("0");
    let text = match path {
        CREATED => match idx {
            CS => format!("Vytvořeno a potvrzeno příkazů k vyřazení: {}", count),
            _ => format!("{} scrap order(s) created and confirmed", count),
        },
        "scrap/ui/confirm_question" => match idx {
            CS => format!("Vyřadit produkty ({})?", count),
            _ => format!("Scrap {} product(s)?", count),
        },
        _ => return None,
    };
    Some(text)
}
