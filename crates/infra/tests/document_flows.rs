//! Cross-crate scenario tests: selection → annulment → repository, and
//! payment finalization against the fiscal ports.

use chrono::{DateTime, TimeZone, Utc};

use storekeep_core::{
    DateRange, InvoiceId, LocationId, OperationId, PartnerId, PaymentId, UserId,
};
use storekeep_documents::{
    DataFormat, Document, DocumentKind, DocumentNumber, DocumentStore, Invoice, NewInvoice,
    NewOperation, NewPayment, Operation, Payment,
};
use storekeep_fiscal::{
    FiscalDevice, FiscalFinalizer, HardwareError, HardwareFaultReport, PaymentDocumentPrinter,
    PaymentReceipt, PrintError,
};
use storekeep_infra::settings::{AUTO_INVOICE_ON_SALE, FISCAL_RECEIPTS, PAYMENT_DOCUMENTS};
use storekeep_infra::{InMemoryRepository, InMemorySettings};
use storekeep_lifecycle::{
    AnnulError, AnnulmentCoordinator, CascadeConfirmation, DependentOutcome, annul_document,
};
use storekeep_selection::{ChoiceIntent, QueryContext, Selector};

fn day(month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, d, 0, 0, 0).unwrap()
}

fn invoice(id: i64, number: &str, partner: &str, date: DateTime<Utc>) -> Invoice {
    Invoice::new(NewInvoice {
        id: InvoiceId::new(id),
        number: DocumentNumber::new(number),
        partner_id: PartnerId::new(id),
        partner_name: partner.to_string(),
        date,
        amount: 10_000,
        data_format: DataFormat::Current,
    })
}

fn sale(id: i64, invoice_number: Option<&str>, date: DateTime<Utc>) -> Operation {
    Operation::new(NewOperation {
        id: OperationId::new(id),
        kind: DocumentKind::Sale,
        partner_id: PartnerId::new(1),
        partner_name: "Acme Trading".to_string(),
        location_id: LocationId::new(1),
        user_id: UserId::new(1),
        date,
        total_amount: 10_000,
        invoice_number: invoice_number.map(DocumentNumber::new),
        data_format: DataFormat::Current,
    })
    .unwrap()
}

fn payment(id: i64) -> Payment {
    Payment::new(NewPayment {
        id: PaymentId::new(id),
        partner_id: PartnerId::new(1),
        partner_name: "Acme Trading".to_string(),
        location_id: LocationId::new(1),
        user_id: UserId::new(1),
        date: day(2, 1),
        amount: 2_500,
        balance: 0,
        operation_id: None,
        data_format: DataFormat::Current,
    })
}

struct AlwaysAnswer(bool);

impl CascadeConfirmation for AlwaysAnswer {
    fn confirm_cascade(&mut self, _invoice: &Invoice) -> bool {
        self.0
    }
}

#[derive(Default)]
struct CountingDevice {
    calls: usize,
}

impl FiscalDevice for CountingDevice {
    fn finalize_operation(
        &mut self,
        _options: &storekeep_fiscal::FinalizeOptions,
    ) -> Result<(), HardwareError> {
        self.calls += 1;
        Ok(())
    }
}

#[derive(Default)]
struct CountingPrinter {
    printed: Vec<i64>,
}

impl PaymentDocumentPrinter for CountingPrinter {
    fn print_preview(&mut self, receipt: &PaymentReceipt) -> Result<(), PrintError> {
        self.printed.push(receipt.payment_id.raw());
        Ok(())
    }
}

#[derive(Default)]
struct SilentFaults;

impl HardwareFaultReport for SilentFaults {
    fn hardware_fault(&mut self, _error: &HardwareError) {}
}

#[test]
fn acme_invoices_within_the_january_window() {
    let repo = InMemoryRepository::new();
    repo.save(invoice(1, "INV-98", "Acme Trading", day(1, 5))).unwrap();
    repo.save(invoice(2, "INV-99", "Borealis Ltd", day(1, 10))).unwrap();
    repo.save(invoice(3, "INV-100", "Acme Trading", day(1, 20))).unwrap();
    // Outside the window.
    repo.save(invoice(4, "INV-101", "Acme Trading", day(2, 2))).unwrap();
    // Matches via document number, not partner.
    repo.save(invoice(5, "ACME-1", "Borealis Ltd", day(1, 25))).unwrap();

    let ctx = QueryContext::new();
    let mut selector = Selector::<Invoice>::load(
        &repo,
        &ctx,
        DocumentKind::Invoice,
        DateRange::between(day(1, 1), day(1, 31)),
    )
    .unwrap();
    selector.filter("Acme");

    let numbers: Vec<String> = selector.rows().map(|i| i.number().to_string()).collect();
    assert_eq!(numbers, vec!["INV-100", "INV-98", "ACME-1"]);
}

#[test]
fn annulling_inv_100_cascades_to_every_resolving_operation() {
    let repo = InMemoryRepository::new();
    repo.save(invoice(1, "INV-100", "Acme Trading", day(1, 10))).unwrap();
    repo.save(sale(10, Some("INV-100"), day(1, 10))).unwrap();
    repo.save(sale(11, Some("INV-100"), day(1, 11))).unwrap();
    repo.save(sale(12, Some("INV-200"), day(1, 12))).unwrap();

    let settings = InMemorySettings::new();
    settings.set_flag(AUTO_INVOICE_ON_SALE, true);

    // Pick the invoice the way an annul flow would.
    let ctx = QueryContext::new();
    let mut selector =
        Selector::<Invoice>::load(&repo, &ctx, DocumentKind::Invoice, DateRange::unbounded())
            .unwrap();
    selector.focus(Some(0));
    let picked = selector.pick().expect("row focused").id_typed();
    let intent = ChoiceIntent::Annul;
    assert!(intent.is_mutating());

    let coordinator = AnnulmentCoordinator::new(&repo, &settings);
    let report = coordinator
        .annul_invoice(picked, &mut AlwaysAnswer(true))
        .unwrap();

    assert!(report.cascaded);
    assert_eq!(report.annulled_dependents(), 2);
    assert_eq!(report.failures().count(), 0);

    let annulled_invoice: Option<Invoice> = repo.get(InvoiceId::new(1)).unwrap();
    assert!(annulled_invoice.unwrap().is_annulled());
    let untouched: Option<Operation> = repo.get(OperationId::new(12)).unwrap();
    assert!(!untouched.unwrap().is_annulled());
}

#[test]
fn declined_cascade_leaves_operations_active() {
    let repo = InMemoryRepository::new();
    repo.save(invoice(1, "INV-100", "Acme Trading", day(1, 10))).unwrap();
    repo.save(sale(10, Some("INV-100"), day(1, 10))).unwrap();

    let settings = InMemorySettings::new();
    settings.set_flag(AUTO_INVOICE_ON_SALE, true);

    let coordinator = AnnulmentCoordinator::new(&repo, &settings);
    let report = coordinator
        .annul_invoice(InvoiceId::new(1), &mut AlwaysAnswer(false))
        .unwrap();

    assert!(!report.cascaded);
    assert!(report.dependents.is_empty());
    let op: Option<Operation> = repo.get(OperationId::new(10)).unwrap();
    assert!(!op.unwrap().is_annulled());
}

#[test]
fn one_refusing_dependent_does_not_block_the_cascade() {
    let repo = InMemoryRepository::new();
    repo.save(invoice(1, "INV-100", "Acme Trading", day(1, 10))).unwrap();
    let mut orphan = sale(10, Some("INV-100"), day(1, 10));
    repo.save(orphan.clone()).unwrap();
    repo.save(sale(11, Some("INV-100"), day(1, 11))).unwrap();

    // Annul one dependent up front so its transition fails mid-cascade,
    // while the other still annuls.
    orphan.annul().unwrap();
    repo.save(orphan).unwrap();

    let settings = InMemorySettings::new();
    settings.set_flag(AUTO_INVOICE_ON_SALE, true);

    let coordinator = AnnulmentCoordinator::new(&repo, &settings);
    let report = coordinator
        .annul_invoice(InvoiceId::new(1), &mut AlwaysAnswer(true))
        .unwrap();

    assert_eq!(report.dependents.len(), 2);
    assert_eq!(report.annulled_dependents(), 1);
    assert_eq!(report.failures().count(), 1);
    assert!(report.dependents.iter().any(
        |o| matches!(o, DependentOutcome::Failed { reference, .. } if reference.id == 10)
    ));
}

#[test]
fn simple_annul_persists_and_refuses_a_second_attempt() {
    let repo = InMemoryRepository::new();
    repo.save(sale(20, None, day(1, 8))).unwrap();

    let annulled: Operation = annul_document(&repo, OperationId::new(20)).unwrap();
    assert!(annulled.is_annulled());
    let stored: Option<Operation> = repo.get(OperationId::new(20)).unwrap();
    assert!(stored.unwrap().is_annulled());

    let err = annul_document::<Operation, _>(&repo, OperationId::new(20)).unwrap_err();
    assert!(matches!(err, AnnulError::Refused(_)));
}

#[test]
fn three_payments_with_fiscal_disabled_print_three_documents() {
    let settings = InMemorySettings::new();
    settings.set_flag(FISCAL_RECEIPTS, false);
    settings.set_flag(PAYMENT_DOCUMENTS, true);

    let mut device = CountingDevice::default();
    let mut printer = CountingPrinter::default();
    let mut faults = SilentFaults;
    let mut surface = ();

    let payments = vec![payment(1), payment(2), payment(3)];
    let report = FiscalFinalizer::new(&mut device, &mut printer, &settings, &mut faults, &mut surface)
        .print_payments(&payments, None)
        .unwrap();

    assert_eq!(device.calls, 0);
    assert_eq!(printer.printed, vec![1, 2, 3]);
    assert_eq!(report.printed_documents(), 3);
    assert!(!report.fiscal_printed);
}

#[test]
fn fiscal_enabled_emits_exactly_one_receipt_for_the_batch() {
    let settings = InMemorySettings::new();
    settings.set_flag(FISCAL_RECEIPTS, true);
    settings.set_flag(PAYMENT_DOCUMENTS, true);

    let mut device = CountingDevice::default();
    let mut printer = CountingPrinter::default();
    let mut faults = SilentFaults;
    let mut surface = ();

    let payments = vec![payment(1), payment(2)];
    let report = FiscalFinalizer::new(&mut device, &mut printer, &settings, &mut faults, &mut surface)
        .print_payments(&payments, None)
        .unwrap();

    assert_eq!(device.calls, 1);
    assert!(report.fiscal_printed);
    assert_eq!(report.printed_documents(), 2);
}

#[test]
fn query_state_survives_into_the_next_selector_of_the_same_kind() {
    let repo = InMemoryRepository::new();
    repo.save(invoice(1, "INV-1", "Acme Trading", day(1, 10))).unwrap();
    repo.save(invoice(2, "INV-2", "Acme Trading", day(3, 10))).unwrap();

    let ctx = QueryContext::new();
    let window = DateRange::between(day(1, 1), day(1, 31));
    let first = Selector::<Invoice>::load(&repo, &ctx, DocumentKind::Invoice, window).unwrap();
    assert_eq!(first.len(), 1);

    // A later flow of the same kind starts from the remembered filter.
    let second =
        Selector::<Invoice>::load_with_last_filter(&repo, &ctx, DocumentKind::Invoice).unwrap();
    assert_eq!(second.range(), window);
    assert_eq!(second.len(), 1);

    // Other kinds are unaffected.
    assert!(ctx.last_filter(DocumentKind::Payment).is_unbounded());
}

#[test]
fn display_width_setting_drives_id_padding() {
    let settings = InMemorySettings::new();
    assert_eq!(OperationId::new(42).padded(settings.number_width()), "0000000042");

    settings.set(storekeep_infra::settings::NUMBER_WIDTH, "4");
    assert_eq!(OperationId::new(42).padded(settings.number_width()), "0042");
}
