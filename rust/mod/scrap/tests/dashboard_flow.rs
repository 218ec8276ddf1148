//! End-to-end dashboard flow against an in-memory ERP.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use openerp_flux::{Flux, I18nStore};
use openerp_rpc::RpcError;
use openerp_scrap::i18n_strings;
use openerp_scrap::request::*;
use openerp_scrap::service::{BarcodeScan, DefaultConfig, ScannedProduct, ScrapLineInput};
use openerp_scrap::state::*;
use openerp_scrap::{register_handlers, ScrapBff, ScrapError, ScrapService, SoundCue, SoundPlayer};
use serde_json::{json, Value};
use tokio::sync::Notify;

// ============================================================================
// Fakes
// ============================================================================

enum CreateReply {
    Created(ScrapResult),
    ServerError(String),
    Rejected(Option<String>),
}

/// Blocks `parse_barcode` until released.
#[derive(Default)]
struct Gate {
    started: Notify,
    release: Notify,
}

struct FakeErp {
    products: HashMap<String, ScannedProduct>,
    default_tag: Option<i64>,
    tags: Vec<ReasonTag>,
    fail_config: AtomicBool,
    fail_scan: AtomicBool,
    fail_adjust: AtomicBool,
    create_reply: Mutex<CreateReply>,
    gate: Option<Arc<Gate>>,
    scans: Mutex<Vec<String>>,
    creates: Mutex<Vec<(Vec<ScrapLineInput>, Vec<i64>)>>,
    config_loads: Mutex<u32>,
}

fn product(product_id: i64, quantity: f64, qty_available: f64) -> ScannedProduct {
    ScannedProduct {
        product_id,
        product_name: format!("Product {}", product_id),
        quantity,
        product_uom: Some("Units".into()),
        product_uom_id: Some(1),
        unit_price: 25.0,
        barcode_type: BarcodeKind::Unit,
        image_url: Some(format!("/web/image/product.product/{}/image_128", product_id)),
        tracking: Tracking::None,
        qty_available,
    }
}

impl FakeErp {
    fn new() -> Self {
        let mut products = HashMap::new();
        products.insert("7-two".to_string(), product(7, 2.0, 5.0));
        products.insert("7-four".to_string(), product(7, 4.0, 5.0));
        products.insert("8".to_string(), product(8, 1.0, 10.0));
        products.insert("9".to_string(), product(9, 1.0, 3.0));
        Self {
            products,
            default_tag: Some(3),
            tags: vec![
                ReasonTag { id: 3, name: "Expired".into() },
                ReasonTag { id: 4, name: "Damaged".into() },
            ],
            fail_config: AtomicBool::new(false),
            fail_scan: AtomicBool::new(false),
            fail_adjust: AtomicBool::new(false),
            create_reply: Mutex::new(CreateReply::Created(ScrapResult {
                scrap_count: 1,
                scraps: vec![CreatedScrap {
                    id: 41,
                    name: "SP/00041".into(),
                    product_name: "Product 7".into(),
                    quantity: 5.0,
                    uom: "Units".into(),
                }],
                stock_after: vec![],
                skipped: vec![],
            })),
            gate: None,
            scans: Mutex::new(Vec::new()),
            creates: Mutex::new(Vec::new()),
            config_loads: Mutex::new(0),
        }
    }
}

#[async_trait]
impl ScrapService for FakeErp {
    async fn default_config(&self) -> Result<DefaultConfig, ScrapError> {
        *self.config_loads.lock().unwrap() += 1;
        if self.fail_config.load(Ordering::SeqCst) {
            return Err(RpcError::Http { status: 502, body: "bad gateway".into() }.into());
        }
        Ok(DefaultConfig {
            id: Some(1),
            default_scrap_reason_tag_id: self.default_tag,
        })
    }

    async fn reason_tags(&self) -> Result<Vec<ReasonTag>, ScrapError> {
        Ok(self.tags.clone())
    }

    async fn parse_barcode(&self, barcode: &str) -> Result<BarcodeScan, ScrapError> {
        self.scans.lock().unwrap().push(barcode.to_string());
        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
        if self.fail_scan.load(Ordering::SeqCst) {
            return Err(RpcError::Http { status: 500, body: "boom".into() }.into());
        }
        Ok(match self.products.get(barcode) {
            Some(p) => BarcodeScan::Found(p.clone()),
            None if barcode == "silent" => BarcodeScan::Rejected(None),
            None => BarcodeScan::Rejected(Some(format!("Product not found for barcode: {}", barcode))),
        })
    }

    async fn create_scrap_orders(
        &self,
        lines: &[ScrapLineInput],
        reason_tag_ids: &[i64],
    ) -> Result<ScrapResult, ScrapError> {
        self.creates
            .lock()
            .unwrap()
            .push((lines.to_vec(), reason_tag_ids.to_vec()));
        match &*self.create_reply.lock().unwrap() {
            CreateReply::Created(result) => Ok(result.clone()),
            CreateReply::ServerError(message) => Err(RpcError::Server {
                code: 200,
                name: "odoo.exceptions.UserError".into(),
                message: message.clone(),
            }
            .into()),
            CreateReply::Rejected(reason) => Err(ScrapError::Rejected(reason.clone())),
        }
    }

    async fn inventory_adjustment_action(&self, product_id: i64) -> Result<Value, ScrapError> {
        if self.fail_adjust.load(Ordering::SeqCst) {
            return Err(RpcError::Decode("unexpected".into()).into());
        }
        Ok(json!({
            "type": "ir.actions.act_window",
            "res_model": "stock.change.product.qty",
            "context": {"default_product_id": product_id},
            "target": "current",
        }))
    }
}

#[derive(Default)]
struct RecordingSound {
    cues: Mutex<Vec<SoundCue>>,
    played: Notify,
}

#[async_trait]
impl SoundPlayer for RecordingSound {
    async fn play(&self, cue: SoundCue) -> std::io::Result<()> {
        self.cues.lock().unwrap().push(cue);
        self.played.notify_one();
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    flux: Arc<Flux>,
    erp: Arc<FakeErp>,
    sound: Arc<RecordingSound>,
    i18n: Arc<I18nStore>,
}

impl Harness {
    async fn start(erp: FakeErp) -> Self {
        Self::start_with_delay(erp, Duration::ZERO).await
    }

    async fn start_with_delay(erp: FakeErp, delay: Duration) -> Self {
        let flux = Arc::new(Flux::new());
        let erp = Arc::new(erp);
        let sound = Arc::new(RecordingSound::default());
        let i18n = Arc::new(I18nStore::new("en"));
        i18n_strings::register_all(&i18n);

        let bff = ScrapBff::new(erp.clone(), sound.clone(), i18n.clone()).with_refocus_delay(delay);
        register_handlers(&flux, Arc::new(bff));
        flux.emit(InitializeReq::PATH, InitializeReq).await;
        Self { flux, erp, sound, i18n }
    }

    async fn scan(&self, code: &str) {
        self.flux
            .emit(BarcodeInputReq::PATH, BarcodeInputReq { value: code.to_string() })
            .await;
        self.flux.emit(SubmitBarcodeReq::PATH, SubmitBarcodeReq).await;
    }

    fn lines(&self) -> Vec<(i64, f64)> {
        self.flux
            .get_cloned::<ScrapLines>(ScrapLines::PATH)
            .unwrap_or_default()
            .items
            .iter()
            .map(|l| (l.product_id, l.quantity))
            .collect()
    }

    fn dashboard(&self) -> DashboardState {
        self.flux.get_cloned::<DashboardState>(DashboardState::PATH).unwrap_or_default()
    }

    fn notices(&self) -> Vec<Notice> {
        self.flux.get_cloned::<Notices>(Notices::PATH).unwrap_or_default().items
    }

    fn last_notice(&self) -> Notice {
        self.notices().pop().expect("a notice")
    }

    fn focus_generation(&self) -> u64 {
        self.flux.get_cloned::<FocusState>(FocusState::PATH).unwrap_or_default().generation
    }

    fn barcode(&self) -> String {
        self.flux.get_cloned::<BarcodeInput>(BarcodeInput::PATH).unwrap_or_default().0
    }

    fn action(&self) -> HostActionState {
        self.flux.get_cloned::<HostActionState>(HostActionState::PATH).unwrap_or_default()
    }
}

// ============================================================================
// Initialization
// ============================================================================

#[tokio::test]
async fn initialize_loads_reasons_and_focuses_input() {
    let h = Harness::start(FakeErp::new()).await;

    let reason = h.flux.get_cloned::<ReasonState>(ReasonState::PATH).unwrap();
    assert_eq!(reason.selected, Some(3));
    assert_eq!(reason.selected_name(), Some("Expired"));
    assert_eq!(reason.tags.len(), 2);

    assert_eq!(h.dashboard(), DashboardState::scanning());
    assert!(h.lines().is_empty());
    assert_eq!(h.focus_generation(), 1);
    assert!(h.notices().is_empty());
}

#[tokio::test]
async fn initialize_without_default_reason() {
    let mut erp = FakeErp::new();
    erp.default_tag = None;
    let h = Harness::start(erp).await;
    let reason = h.flux.get_cloned::<ReasonState>(ReasonState::PATH).unwrap();
    assert_eq!(reason.selected, None);
    assert_eq!(reason.selected_name(), None);
}

#[tokio::test]
async fn initialize_failure_leaves_dashboard_usable() {
    let erp = FakeErp::new();
    erp.fail_config.store(true, Ordering::SeqCst);
    let h = Harness::start(erp).await;

    let notice = h.last_notice();
    assert_eq!(notice.severity, Severity::Danger);
    assert_eq!(notice.message, "Could not load scrap settings");

    let reason = h.flux.get_cloned::<ReasonState>(ReasonState::PATH).unwrap();
    assert_eq!(reason.selected, None);
    assert_eq!(reason.tags.len(), 2);

    h.scan("8").await;
    assert_eq!(h.lines(), vec![(8, 1.0)]);
}

// ============================================================================
// Scanning
// ============================================================================

#[tokio::test]
async fn repeat_scan_merges_and_caps_at_stock() {
    let h = Harness::start(FakeErp::new()).await;

    h.scan("7-two").await;
    assert_eq!(h.lines(), vec![(7, 2.0)]);

    h.scan("7-four").await;
    assert_eq!(h.lines(), vec![(7, 5.0)]);
}

#[tokio::test]
async fn scan_clears_input_and_refocuses() {
    let h = Harness::start(FakeErp::new()).await;
    let before = h.focus_generation();

    h.scan("  8  ").await;

    assert_eq!(h.erp.scans.lock().unwrap().as_slice(), ["8".to_string()]);
    assert_eq!(h.barcode(), "");
    assert!(!h.dashboard().loading);
    assert_eq!(h.focus_generation(), before + 1);
}

#[tokio::test]
async fn successful_scan_plays_success_cue() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("8").await;
    h.sound.played.notified().await;
    assert_eq!(*h.sound.cues.lock().unwrap(), vec![SoundCue::Success]);
}

#[tokio::test]
async fn unknown_barcode_shows_server_reason() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("000").await;

    let notice = h.last_notice();
    assert_eq!(notice.severity, Severity::Danger);
    assert_eq!(notice.title.as_deref(), Some("Barcode Error"));
    assert_eq!(notice.message, "Product not found for barcode: 000");
    assert!(h.lines().is_empty());

    h.sound.played.notified().await;
    assert_eq!(*h.sound.cues.lock().unwrap(), vec![SoundCue::Error]);
}

#[tokio::test]
async fn rejection_without_reason_uses_default_message() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("silent").await;
    assert_eq!(h.last_notice().message, "Product not found");
}

#[tokio::test]
async fn lookup_failure_is_generic_and_scanning_continues() {
    let h = Harness::start(FakeErp::new()).await;
    h.erp.fail_scan.store(true, Ordering::SeqCst);
    h.scan("8").await;

    let notice = h.last_notice();
    assert_eq!(notice.message, "Error scanning barcode");
    assert_eq!(notice.title, None);
    assert_eq!(h.dashboard().phase, DashboardPhase::Scanning);

    h.erp.fail_scan.store(false, Ordering::SeqCst);
    h.scan("8").await;
    assert_eq!(h.lines(), vec![(8, 1.0)]);
}

#[tokio::test]
async fn blank_barcode_is_ignored() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("   ").await;
    assert!(h.erp.scans.lock().unwrap().is_empty());
    assert_eq!(h.barcode(), "   ");
}

#[tokio::test]
async fn second_submit_while_resolving_is_dropped() {
    let gate = Arc::new(Gate::default());
    let mut erp = FakeErp::new();
    erp.gate = Some(gate.clone());
    let h = Harness::start(erp).await;

    h.flux
        .emit(BarcodeInputReq::PATH, BarcodeInputReq { value: "8".into() })
        .await;
    let flux = h.flux.clone();
    let first = tokio::spawn(async move {
        flux.emit(SubmitBarcodeReq::PATH, SubmitBarcodeReq).await;
    });
    gate.started.notified().await;
    assert_eq!(h.barcode(), "");

    h.scan("9").await;
    assert_eq!(h.barcode(), "9");

    gate.release.notify_one();
    first.await.unwrap();

    assert_eq!(h.erp.scans.lock().unwrap().as_slice(), ["8".to_string()]);
    assert_eq!(h.lines(), vec![(8, 1.0)]);
}

/// Starts a gated scan of `code` and waits until the lookup is blocked.
async fn scan_held(h: &Harness, gate: &Gate, code: &str) -> tokio::task::JoinHandle<()> {
    h.flux
        .emit(BarcodeInputReq::PATH, BarcodeInputReq { value: code.into() })
        .await;
    let flux = h.flux.clone();
    let task = tokio::spawn(async move {
        flux.emit(SubmitBarcodeReq::PATH, SubmitBarcodeReq).await;
    });
    gate.started.notified().await;
    task
}

fn gated() -> (Arc<Gate>, FakeErp) {
    let gate = Arc::new(Gate::default());
    let mut erp = FakeErp::new();
    erp.gate = Some(gate.clone());
    (gate, erp)
}

#[tokio::test]
async fn request_waits_for_pending_scan() {
    let (gate, erp) = gated();
    let h = Harness::start(erp).await;
    gate.release.notify_one();
    h.scan("8").await;
    gate.started.notified().await;

    let pending = scan_held(&h, &gate, "9").await;
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    h.flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await;

    assert_eq!(h.dashboard().phase, DashboardPhase::Scanning);
    let notice = h.last_notice();
    assert_eq!(notice.severity, Severity::Warning);
    assert_eq!(notice.message, "Wait for the barcode to be resolved");

    gate.release.notify_one();
    pending.await.unwrap();

    assert!(h.erp.creates.lock().unwrap().is_empty());
    assert_eq!(h.dashboard(), DashboardState::scanning());
    assert_eq!(h.lines(), vec![(8, 1.0), (9, 1.0)]);

    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    assert_eq!(h.dashboard().phase, DashboardPhase::ConfirmPending);
}

#[tokio::test]
async fn scan_resolved_outside_scanning_is_discarded() {
    let (gate, erp) = gated();
    let h = Harness::start(erp).await;

    let pending = scan_held(&h, &gate, "9").await;
    h.flux.store().update(
        DashboardState::PATH,
        DashboardState::scanning,
        |d: &mut DashboardState| d.phase = DashboardPhase::ShowingResult,
    );
    gate.release.notify_one();
    pending.await.unwrap();

    assert!(h.lines().is_empty());
    assert!(!h.dashboard().loading);
    let notice = h.last_notice();
    assert_eq!(notice.severity, Severity::Danger);
    assert_eq!(notice.message, "Scan discarded: the dashboard is no longer scanning");
    h.sound.played.notified().await;
    assert_eq!(*h.sound.cues.lock().unwrap(), vec![SoundCue::Error]);
}

#[tokio::test]
async fn scan_resolved_after_close_writes_nothing() {
    let (gate, erp) = gated();
    let h = Harness::start(erp).await;

    let pending = scan_held(&h, &gate, "8").await;
    h.flux.emit(CloseReq::PATH, CloseReq).await;
    gate.release.notify_one();
    pending.await.unwrap();

    for path in ALL_PATHS {
        assert!(!h.flux.contains(path), "{} written after close", path);
    }
}

#[tokio::test]
async fn loading_holds_until_every_call_finishes() {
    let (gate, erp) = gated();
    let h = Harness::start(erp).await;

    let pending = scan_held(&h, &gate, "8").await;
    assert!(h.dashboard().loading);

    h.flux
        .emit(AdjustInventoryReq::PATH, AdjustInventoryReq { product_id: 7 })
        .await;
    assert!(h.action().action.is_some());
    assert!(h.dashboard().loading);

    gate.release.notify_one();
    pending.await.unwrap();
    assert!(!h.dashboard().loading);
    assert_eq!(h.dashboard().pending, 0);
}

// ============================================================================
// Line editing
// ============================================================================

#[tokio::test]
async fn increment_at_stock_stays_put() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("7-two").await;
    h.scan("7-four").await;

    h.flux.emit(IncrementLineReq::PATH, IncrementLineReq { index: 0 }).await;
    assert_eq!(h.lines(), vec![(7, 5.0)]);
}

#[tokio::test]
async fn decrement_at_one_removes_line() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("8").await;
    h.scan("9").await;
    h.scan("7-two").await;

    h.flux.emit(DecrementLineReq::PATH, DecrementLineReq { index: 1 }).await;
    assert_eq!(h.lines(), vec![(8, 1.0), (7, 2.0)]);

    h.flux.emit(DecrementLineReq::PATH, DecrementLineReq { index: 1 }).await;
    assert_eq!(h.lines(), vec![(8, 1.0), (7, 1.0)]);
}

#[tokio::test]
async fn manual_edit_scrap_all_and_remove() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("8").await;
    h.scan("9").await;

    h.flux
        .emit(SetQuantityReq::PATH, SetQuantityReq { index: 0, value: 4.5 })
        .await;
    h.flux
        .emit(SetQuantityReq::PATH, SetQuantityReq { index: 1, value: f64::NAN })
        .await;
    assert_eq!(h.lines(), vec![(8, 4.5), (9, 1.0)]);

    h.flux.emit(ScrapAllLineReq::PATH, ScrapAllLineReq { index: 1 }).await;
    assert_eq!(h.lines(), vec![(8, 4.5), (9, 3.0)]);

    h.flux.emit(RemoveLineReq::PATH, RemoveLineReq { index: 0 }).await;
    assert_eq!(h.lines(), vec![(9, 3.0)]);
}

#[tokio::test]
async fn out_of_range_edit_changes_nothing() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("8").await;
    let focus = h.focus_generation();

    h.flux.emit(RemoveLineReq::PATH, RemoveLineReq { index: 4 }).await;
    h.flux.emit(IncrementLineReq::PATH, IncrementLineReq { index: 4 }).await;

    assert_eq!(h.lines(), vec![(8, 1.0)]);
    assert_eq!(h.focus_generation(), focus);
}

#[tokio::test]
async fn reason_selection_and_clear() {
    let h = Harness::start(FakeErp::new()).await;
    h.flux
        .emit(SelectReasonReq::PATH, SelectReasonReq { tag_id: Some(4) })
        .await;
    let reason = h.flux.get_cloned::<ReasonState>(ReasonState::PATH).unwrap();
    assert_eq!(reason.selected_name(), Some("Damaged"));

    h.flux
        .emit(SelectReasonReq::PATH, SelectReasonReq { tag_id: Some(0) })
        .await;
    let reason = h.flux.get_cloned::<ReasonState>(ReasonState::PATH).unwrap();
    assert_eq!(reason.selected, None);
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn request_without_lines_warns_and_sends_nothing() {
    let h = Harness::start(FakeErp::new()).await;
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    h.flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await;

    let notice = h.last_notice();
    assert_eq!(notice.severity, Severity::Warning);
    assert_eq!(notice.message, "No products to scrap");
    assert_eq!(h.dashboard().phase, DashboardPhase::Scanning);
    assert!(h.erp.creates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn confirm_sends_lines_and_reason_then_shows_result() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("7-two").await;
    h.scan("7-four").await;

    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    assert_eq!(h.dashboard().phase, DashboardPhase::ConfirmPending);

    h.flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await;

    let creates = h.erp.creates.lock().unwrap().clone();
    assert_eq!(
        creates,
        vec![(
            vec![ScrapLineInput { product_id: 7, quantity: 5.0, product_uom_id: Some(1) }],
            vec![3]
        )]
    );

    assert_eq!(
        h.dashboard(),
        DashboardState { phase: DashboardPhase::ShowingResult, loading: false, pending: 0 }
    );
    let result = h.flux.get_cloned::<ScrapResultState>(ScrapResultState::PATH).unwrap();
    assert_eq!(result.result.map(|r| r.scrap_count), Some(1));

    let notice = h.last_notice();
    assert_eq!(notice.severity, Severity::Success);
    assert_eq!(notice.message, "1 scrap order(s) created and confirmed");
}

#[tokio::test]
async fn confirm_without_reason_sends_empty_tag_list() {
    let mut erp = FakeErp::new();
    erp.default_tag = None;
    let h = Harness::start(erp).await;
    h.scan("8").await;
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    h.flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await;
    assert!(h.erp.creates.lock().unwrap()[0].1.is_empty());
}

#[tokio::test]
async fn confirm_failure_keeps_lines_for_retry() {
    let erp = FakeErp::new();
    *erp.create_reply.lock().unwrap() = CreateReply::ServerError("Scrap location is archived".into());
    let h = Harness::start(erp).await;
    h.scan("8").await;

    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    h.flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await;

    assert_eq!(h.dashboard(), DashboardState::scanning());
    assert_eq!(h.lines(), vec![(8, 1.0)]);
    let notice = h.last_notice();
    assert_eq!(notice.severity, Severity::Danger);
    assert_eq!(notice.message, "Scrap location is archived");
    assert_eq!(
        h.flux.get_cloned::<ScrapResultState>(ScrapResultState::PATH).unwrap().result,
        None
    );

    *h.erp.create_reply.lock().unwrap() = CreateReply::Rejected(None);
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    h.flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await;
    assert_eq!(h.last_notice().message, "Error creating scrap orders");
    assert_eq!(h.erp.creates.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn unsuccessful_confirm_shows_server_reason() {
    let erp = FakeErp::new();
    *erp.create_reply.lock().unwrap() = CreateReply::Rejected(Some("Quantity exceeds stock".into()));
    let h = Harness::start(erp).await;
    h.scan("8").await;

    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    h.flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await;

    assert_eq!(h.dashboard(), DashboardState::scanning());
    assert_eq!(h.lines(), vec![(8, 1.0)]);
    let notice = h.last_notice();
    assert_eq!(notice.severity, Severity::Danger);
    assert_eq!(notice.message, "Quantity exceeds stock");
}

#[tokio::test]
async fn cancel_returns_to_scanning() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("8").await;
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    let focus = h.focus_generation();

    h.flux.emit(CancelScrapReq::PATH, CancelScrapReq).await;

    assert_eq!(h.dashboard().phase, DashboardPhase::Scanning);
    assert_eq!(h.focus_generation(), focus + 1);
    assert_eq!(h.lines(), vec![(8, 1.0)]);
}

#[tokio::test]
async fn scanning_is_suspended_while_confirming() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("8").await;
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;

    h.scan("9").await;
    h.flux.emit(IncrementLineReq::PATH, IncrementLineReq { index: 0 }).await;

    assert_eq!(h.lines(), vec![(8, 1.0)]);
    assert_eq!(h.erp.scans.lock().unwrap().len(), 1);
}

// ============================================================================
// Keyboard
// ============================================================================

#[tokio::test]
async fn stray_keys_refocus_only_while_scanning() {
    let h = Harness::start(FakeErp::new()).await;
    let g = h.focus_generation();

    h.flux.emit(KeyDownReq::PATH, KeyDownReq { target: KeyTarget::Other }).await;
    assert_eq!(h.focus_generation(), g + 1);

    h.flux.emit(KeyDownReq::PATH, KeyDownReq { target: KeyTarget::TextField }).await;
    assert_eq!(h.focus_generation(), g + 1);

    h.scan("8").await;
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    let g = h.focus_generation();
    h.flux.emit(KeyDownReq::PATH, KeyDownReq { target: KeyTarget::Other }).await;
    assert_eq!(h.focus_generation(), g);
}

#[tokio::test]
async fn close_drops_state_and_ignores_keys() {
    let h = Harness::start(FakeErp::new()).await;
    h.scan("8").await;

    h.flux.emit(CloseReq::PATH, CloseReq).await;
    for path in ALL_PATHS {
        assert!(!h.flux.contains(path), "{} still present", path);
    }

    h.flux.emit(KeyDownReq::PATH, KeyDownReq { target: KeyTarget::Other }).await;
    assert!(!h.flux.contains(FocusState::PATH));
}

// ============================================================================
// Result view
// ============================================================================

async fn finished(h: &Harness) {
    h.scan("7-two").await;
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    h.flux.emit(ConfirmScrapReq::PATH, ConfirmScrapReq).await;
    assert_eq!(h.dashboard().phase, DashboardPhase::ShowingResult);
}

#[tokio::test]
async fn open_record_actions() {
    let h = Harness::start(FakeErp::new()).await;
    finished(&h).await;

    h.flux.emit(OpenScrapReq::PATH, OpenScrapReq { scrap_id: 41 }).await;
    let a = h.action();
    assert_eq!(a.seq, 1);
    assert_eq!(
        a.action,
        Some(HostAction::OpenRecord { model: "stock.scrap".into(), id: 41 })
    );

    h.flux.emit(OpenProductReq::PATH, OpenProductReq { product_id: 7 }).await;
    let a = h.action();
    assert_eq!(a.seq, 2);
    let d = a.action.unwrap().descriptor();
    assert_eq!(d["res_model"], "product.product");
    assert_eq!(d["target"], "new");
}

#[tokio::test]
async fn inventory_adjustment_opens_server_action_in_dialog() {
    let h = Harness::start(FakeErp::new()).await;
    finished(&h).await;

    h.flux
        .emit(AdjustInventoryReq::PATH, AdjustInventoryReq { product_id: 7 })
        .await;
    match h.action().action {
        Some(HostAction::Server { descriptor }) => {
            assert_eq!(descriptor["target"], "new");
            assert_eq!(descriptor["context"]["default_product_id"], 7);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(!h.dashboard().loading);
}

#[tokio::test]
async fn inventory_adjustment_failure_notifies() {
    let h = Harness::start(FakeErp::new()).await;
    h.erp.fail_adjust.store(true, Ordering::SeqCst);
    h.flux
        .emit(AdjustInventoryReq::PATH, AdjustInventoryReq { product_id: 7 })
        .await;
    assert_eq!(h.last_notice().message, "Could not open inventory adjustment");
    assert_eq!(h.action().action, None);
}

#[tokio::test(start_paused = true)]
async fn new_session_resets_and_refocuses_after_delay() {
    let h = Harness::start_with_delay(FakeErp::new(), Duration::from_millis(100)).await;
    finished(&h).await;
    h.flux
        .emit(BarcodeInputReq::PATH, BarcodeInputReq { value: "half-typed".into() })
        .await;
    let focus = h.focus_generation();

    h.flux.emit(NewSessionReq::PATH, NewSessionReq).await;

    assert!(h.lines().is_empty());
    assert_eq!(h.barcode(), "");
    assert_eq!(h.dashboard(), DashboardState::scanning());
    assert_eq!(
        h.flux.get_cloned::<ScrapResultState>(ScrapResultState::PATH).unwrap().result,
        None
    );
    assert_eq!(*h.erp.config_loads.lock().unwrap(), 2);
    assert_eq!(h.focus_generation(), focus);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(h.focus_generation(), focus + 1);
}

#[tokio::test(start_paused = true)]
async fn close_cancels_delayed_refocus() {
    let h = Harness::start_with_delay(FakeErp::new(), Duration::from_millis(100)).await;
    finished(&h).await;

    h.flux.emit(NewSessionReq::PATH, NewSessionReq).await;
    h.flux.emit(CloseReq::PATH, CloseReq).await;
    tokio::time::sleep(Duration::from_millis(150)).await;

    for path in ALL_PATHS {
        assert!(!h.flux.contains(path), "{} written after close", path);
    }
}

// ============================================================================
// Notices
// ============================================================================

#[tokio::test]
async fn dismiss_notice_by_id() {
    let h = Harness::start(FakeErp::new()).await;
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    h.scan("000").await;
    let notices = h.notices();
    assert_eq!(notices.len(), 2);

    h.flux
        .emit(DismissNoticeReq::PATH, DismissNoticeReq { id: notices[0].id })
        .await;
    let left = h.notices();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, notices[1].id);
}

#[tokio::test]
async fn notices_follow_locale() {
    let h = Harness::start(FakeErp::new()).await;
    h.i18n.set_locale("cs");
    h.flux.emit(RequestScrapReq::PATH, RequestScrapReq).await;
    assert_eq!(h.last_notice().message, "Žádné produkty k vyřazení");
}
