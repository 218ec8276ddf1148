//! Line-oriented terminal host.
//!
//! A barcode scanner types the code and presses Enter, so any line that
//! does not start with `:` is a scan. Everything else is a command:
//!
//! ```text
//! :qty 2 1.5     set line 2 to 1.5
//! :+ 1  :- 1     increment / decrement line 1
//! :all 1         scrap all stock of line 1
//! :rm 1          remove line 1
//! :reason 3      select reason tag 3 (:reason none clears)
//! :scrap         ask for confirmation
//! :yes  :no      confirm / cancel
//! :order 41      open scrap order 41
//! :product 7     open product 7
//! :adjust 7      inventory adjustment for product 7
//! :new           start a new session
//! :quit
//! ```
//!
//! Line numbers are 1-based on screen.

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use openerp_flux::{Flux, I18nStore};
use openerp_scrap::format::{format_currency, format_quantity};
use openerp_scrap::request::*;
use openerp_scrap::state::*;

pub const HELP: &str = "\
scan a barcode, or:
  :qty N Q   :+ N   :- N   :all N   :rm N
  :reason ID|none   :scrap   :yes   :no
  :order ID   :product ID   :adjust ID   :new   :help   :quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Scan(String),
    SetQuantity { index: usize, value: f64 },
    Increment(usize),
    Decrement(usize),
    ScrapAll(usize),
    Remove(usize),
    Reason(Option<i64>),
    Request,
    Confirm,
    Cancel,
    OpenScrap(i64),
    OpenProduct(i64),
    Adjust(i64),
    NewSession,
    /// An empty line: a key press outside any field.
    StrayKey,
    Help,
    Quit,
}

// ============================================================================
// Parsing
// ============================================================================

pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(Command::StrayKey);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Scan(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let cmd = match name {
        "qty" => {
            let [n, q] = args[..] else {
                bail!("usage: :qty LINE QUANTITY");
            };
            let value: f64 = q
                .replace(',', ".")
                .parse()
                .with_context(|| format!("not a quantity: {q}"))?;
            Command::SetQuantity { index: line_index(n)?, value }
        }
        "+" => Command::Increment(line_index(single(&args, name)?)?),
        "-" => Command::Decrement(line_index(single(&args, name)?)?),
        "all" => Command::ScrapAll(line_index(single(&args, name)?)?),
        "rm" => Command::Remove(line_index(single(&args, name)?)?),
        "reason" => match single(&args, name)? {
            "none" | "0" => Command::Reason(None),
            id => Command::Reason(Some(record_id(id)?)),
        },
        "scrap" => Command::Request,
        "yes" | "y" => Command::Confirm,
        "no" | "n" => Command::Cancel,
        "order" => Command::OpenScrap(record_id(single(&args, name)?)?),
        "product" => Command::OpenProduct(record_id(single(&args, name)?)?),
        "adjust" => Command::Adjust(record_id(single(&args, name)?)?),
        "new" => Command::NewSession,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => bail!("unknown command :{other} (try :help)"),
    };
    Ok(cmd)
}

fn single<'a>(args: &[&'a str], name: &str) -> Result<&'a str> {
    match args {
        [arg] => Ok(*arg),
        _ => bail!("usage: :{name} ARG"),
    }
}

/// Screen line number to list index.
fn line_index(s: &str) -> Result<usize> {
    let n: usize = s.parse().with_context(|| format!("not a line number: {s}"))?;
    if n == 0 {
        bail!("lines are numbered from 1");
    }
    Ok(n - 1)
}

fn record_id(s: &str) -> Result<i64> {
    let id: i64 = s.parse().with_context(|| format!("not a record id: {s}"))?;
    if id <= 0 {
        bail!("record ids are positive");
    }
    Ok(id)
}

// ============================================================================
// Dispatch
// ============================================================================

/// Emit the requests behind `cmd`. `Help` and `Quit` emit nothing.
pub async fn dispatch(flux: &Flux, cmd: Command) {
    match cmd {
        Command::Scan(value) => {
            flux.emit(BarcodeInputReq::PATH, BarcodeInputReq { value }).await;
            flux.emit(SubmitBarcodeReq::PATH, SubmitBarcodeReq).await;
        }
        Command::SetQuantity { index, value } => {
            flux.emit(SetQuantityReq::PATH, SetQuantityReq { index, value }).await
        }
        Command::Increment(index) => {
            flux.emit(IncrementLineReq::PATH, IncrementLineReq { index }).await
        }
        Command::Decrement(index) => {
            flux.emit(DecrementLineReq::PATH, DecrementLineReq { index }).await
        }
        Command::ScrapAll(index) => {
            flux.emit(ScrapAllLineReq::PATH, ScrapAllLineReq { index }).await
        }
        Command::Remove(index) => flux.emit(RemoveLineReq::PATH, RemoveLineReq { index }).await,
        Command::Reason(tag_id) => {
            flux.emit(SelectReasonReq::PATH, SelectReasonReq { tag_id }).await
        }
        Command::Request => flux.emit(RequestScrapReq::PATH, RequestScrapReq).await,
        Command::Confirm => flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await,
        Command::Cancel => flux.emit(CancelScrapReq::PATH, CancelScrapReq).await,
        Command::OpenScrap(scrap_id) => {
            flux.emit(OpenScrapReq::PATH, OpenScrapReq { scrap_id }).await
        }
        Command::OpenProduct(product_id) => {
            flux.emit(OpenProductReq::PATH, OpenProductReq { product_id }).await
        }
        Command::Adjust(product_id) => {
            flux.emit(AdjustInventoryReq::PATH, AdjustInventoryReq { product_id }).await
        }
        Command::NewSession => flux.emit(NewSessionReq::PATH, NewSessionReq).await,
        Command::StrayKey => {
            flux.emit(KeyDownReq::PATH, KeyDownReq { target: KeyTarget::Other }).await
        }
        Command::Help | Command::Quit => {}
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders the dashboard state as plain text.
pub struct Screen<'a> {
    pub i18n: &'a I18nStore,
    pub currency: &'a str,
}

impl Screen<'_> {
    fn t(&self, key: &str) -> String {
        self.i18n.get(key)
    }

    fn money(&self, value: f64) -> String {
        format_currency(Some(value), self.currency)
    }

    /// The current view for `flux`'s state.
    pub fn render(&self, flux: &Flux) -> String {
        let dashboard = flux
            .get_cloned::<DashboardState>(DashboardState::PATH)
            .unwrap_or_default();
        let lines = flux.get_cloned::<ScrapLines>(ScrapLines::PATH).unwrap_or_default();
        let reason = flux.get_cloned::<ReasonState>(ReasonState::PATH).unwrap_or_default();

        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", self.t("scrap/ui/title"));
        match dashboard.phase {
            DashboardPhase::ShowingResult => {
                let result = flux
                    .get_cloned::<ScrapResultState>(ScrapResultState::PATH)
                    .and_then(|r| r.result)
                    .unwrap_or_default();
                self.result(&mut out, &result);
            }
            DashboardPhase::Scanning | DashboardPhase::ConfirmPending => {
                self.scanning(&mut out, &lines, &reason);
                if dashboard.phase == DashboardPhase::ConfirmPending {
                    let _ = writeln!(
                        out,
                        "{}: {} [:yes / :no]",
                        self.t("scrap/ui/confirm_title"),
                        self.t(&format!("scrap/ui/confirm_question?count={}", lines.total_items())),
                    );
                }
            }
        }
        if dashboard.loading {
            let _ = writeln!(out, "{}", self.t("scrap/ui/loading"));
        }
        out
    }

    fn scanning(&self, out: &mut String, lines: &ScrapLines, reason: &ReasonState) {
        let reason_name = reason
            .selected_name()
            .map(str::to_string)
            .unwrap_or_else(|| self.t("scrap/ui/no_reason"));
        let _ = writeln!(out, "{}: {}", self.t("scrap/ui/reason"), reason_name);
        if !reason.tags.is_empty() {
            let tags: Vec<String> = reason
                .tags
                .iter()
                .map(|t| format!("{}={}", t.id, t.name))
                .collect();
            let _ = writeln!(out, "  ({})", tags.join(", "));
        }

        if !lines.has_lines() {
            let _ = writeln!(out, "{}", self.t("scrap/ui/scan_hint"));
            return;
        }
        for (i, line) in lines.items.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {}  {} {} / {} {}  {}",
                i + 1,
                line.product_name,
                format_quantity(Some(line.quantity)),
                line.uom,
                format_quantity(Some(line.qty_available)),
                self.t("scrap/ui/available"),
                self.money(line.value()),
            );
        }
        let _ = writeln!(
            out,
            "{}: {}   {}: {}",
            self.t("scrap/ui/total_items"),
            lines.total_items(),
            self.t("scrap/ui/total_value"),
            self.money(lines.total_value()),
        );
    }

    fn result(&self, out: &mut String, result: &ScrapResult) {
        let _ = writeln!(out, "{}", self.t("scrap/ui/result_title"));
        for scrap in &result.scraps {
            let _ = writeln!(
                out,
                "  #{} {}  {}  {} {}",
                scrap.id,
                scrap.name,
                scrap.product_name,
                format_quantity(Some(scrap.quantity)),
                scrap.uom,
            );
        }
        if !result.stock_after.is_empty() {
            let _ = writeln!(out, "{}:", self.t("scrap/ui/stock_after"));
            for level in &result.stock_after {
                let _ = writeln!(
                    out,
                    "  [{}] {}  {} {}  {}",
                    level.product_id,
                    level.product_name,
                    format_quantity(Some(level.qty_available)),
                    level.uom,
                    self.money(level.value),
                );
            }
        }
        if !result.skipped.is_empty() {
            let _ = writeln!(out, "{}: {}", self.t("scrap/ui/skipped"), result.skipped.join(", "));
        }
        let _ = writeln!(out, "{} (:new)", self.t("scrap/ui/new_session"));
    }
}

/// One line per notice, oldest first.
pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.severity {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Warning => "warn",
        Severity::Danger => "error",
    };
    match &notice.title {
        Some(title) => format!("[{tag}] {title}: {}", notice.message),
        None => format!("[{tag}] {}", notice.message),
    }
}

/// Where the host would open `action`.
pub fn render_action(server: &str, action: &HostAction) -> String {
    match action {
        HostAction::OpenRecord { model, id } => format!(
            "open {}/web#id={}&model={}&view_type=form",
            server.trim_end_matches('/'),
            id,
            model
        ),
        HostAction::Server { .. } => {
            let descriptor = action.descriptor();
            let name = descriptor
                .get("name")
                .and_then(|n| n.as_str())
                .or_else(|| descriptor.get("res_model").and_then(|m| m.as_str()))
                .unwrap_or("action");
            format!("open dialog {}: {}", name, descriptor)
        }
    }
}
