/*!
 * Debt Detail Resolver Tests
 *
 * Covers the public debt page: not-found handling for missing or unknown
 * ids, the derived display facts, the PIX payload layout, QR rendering and
 * the dashboard summary.
 */

mod common;

use cobra_amigo::detail::{
    DebtView, days_elapsed, describe, format_amount, format_since, overdue_hint, resolve,
    summarize,
};
use cobra_amigo::models::NewDebt;
use cobra_amigo::qr::{pix_payload, render_svg};
use cobra_amigo::utils::share_link;
use common::*;
use time::macros::date;
use uuid::Uuid;

#[test]
fn days_elapsed_counts_whole_days() {
    assert_eq!(days_elapsed(date!(2024 - 01 - 01), date!(2024 - 01 - 01)), 0);
    assert_eq!(days_elapsed(date!(2024 - 01 - 01), date!(2024 - 01 - 02)), 1);
    assert_eq!(days_elapsed(date!(2024 - 01 - 01), date!(2024 - 03 - 01)), 60);
}

#[test]
fn future_start_date_clamps_to_zero() {
    assert_eq!(days_elapsed(date!(2030 - 06 - 01), date!(2024 - 01 - 01)), 0);
}

#[test]
fn amount_and_date_formatting() {
    assert_eq!(format_amount(50.0), "R$ 50.00");
    assert_eq!(format_amount(10.5), "R$ 10.50");
    assert_eq!(format_amount(0.0), "R$ 0.00");
    assert_eq!(format_since(date!(2024 - 01 - 09)), "09/01/2024");
}

#[test]
fn overdue_hint_tiers() {
    assert_eq!(overdue_hint(0), None);
    assert_eq!(overdue_hint(1), Some("Ainda dá tempo de resolver rapidinho! 😉"));
    assert_eq!(overdue_hint(7), Some("Ainda dá tempo de resolver rapidinho! 😉"));
    assert_eq!(overdue_hint(8), Some("Já passou da hora! ⏰"));
    assert_eq!(overdue_hint(30), Some("Já passou da hora! ⏰"));
    assert_eq!(overdue_hint(31), Some("Tempo demais, não acha? 🤨"));
}

#[tokio::test]
async fn pix_payload_layout() {
    let (_db, store, _temp_dir) = setup_test_environment().await;

    let whole = create_test_debt(&store, TEST_OWNER, "Ana", 50.0).await;
    assert_eq!(pix_payload(&whole), "ana@pix|50|Ana");

    let fractional = create_test_debt(&store, TEST_OWNER, "Bia", 12.5).await;
    assert_eq!(pix_payload(&fractional), "bia@pix|12.5|Bia");
}

#[tokio::test]
async fn pix_payload_does_not_escape_separator() {
    let (_db, store, _temp_dir) = setup_test_environment().await;
    let debt = store
        .create(
            TEST_OWNER,
            NewDebt {
                debtor_name: "Ana|Bia".to_string(),
                amount: 3.0,
                start_date: TEST_START_DATE,
                pix_key: "key|x".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(pix_payload(&debt), "key|x|3|Ana|Bia");
}

#[tokio::test]
async fn resolve_without_id_is_not_found() {
    let (_db, store, _temp_dir) = setup_test_environment().await;
    let today = date!(2024 - 02 - 01);

    assert_eq!(resolve(&store, None, today).await.unwrap(), DebtView::NotFound);
    assert_eq!(
        resolve(&store, Some("  "), today).await.unwrap(),
        DebtView::NotFound
    );
}

#[tokio::test]
async fn resolve_unknown_id_is_not_found() {
    let (_db, store, _temp_dir) = setup_test_environment().await;

    let view = resolve(
        &store,
        Some(&Uuid::new_v4().to_string()),
        date!(2024 - 02 - 01),
    )
    .await
    .unwrap();

    assert_eq!(view, DebtView::NotFound);
}

#[tokio::test]
async fn resolve_found_derives_display_facts() {
    let (_db, store, _temp_dir) = setup_test_environment().await;
    let debt = create_test_debt(&store, OTHER_OWNER, "Ana", 50.0).await;

    let view = resolve(&store, Some(&debt.id), date!(2024 - 01 - 11))
        .await
        .unwrap();

    let DebtView::Found(detail) = view else {
        panic!("expected the debt to resolve");
    };
    assert_eq!(detail.debt, debt);
    assert_eq!(detail.days_elapsed, 10);
    assert_eq!(detail.formatted_amount, "R$ 50.00");
    assert_eq!(detail.since, "01/01/2024");
    assert_eq!(detail.overdue_hint, Some("Já passou da hora! ⏰"));
    assert_eq!(detail.pix_payload, "ana@pix|50|Ana");
}

#[tokio::test]
async fn describe_future_debt_has_no_hint() {
    let (_db, store, _temp_dir) = setup_test_environment().await;
    let debt = create_test_debt(&store, TEST_OWNER, "Ana", 50.0).await;

    let detail = describe(debt, date!(2023 - 12 - 01));

    assert_eq!(detail.days_elapsed, 0);
    assert_eq!(detail.overdue_hint, None);
}

#[tokio::test]
async fn summary_totals_and_overdue() {
    let (_db, store, _temp_dir) = setup_test_environment().await;
    let recent = store
        .create(
            TEST_OWNER,
            NewDebt {
                start_date: date!(2024 - 01 - 05),
                ..new_debt("Recent", 10.25)
            },
        )
        .await
        .unwrap();
    let old = create_test_debt(&store, TEST_OWNER, "Old", 20.5).await;

    let summary = summarize(&[recent, old], date!(2024 - 01 - 10));

    assert_eq!(summary.count, 2);
    assert_eq!(summary.total_amount, 30.75);
    assert_eq!(summary.overdue_count, 1);
}

#[tokio::test]
async fn summary_counts_overdue_from_seventh_day() {
    let (_db, store, _temp_dir) = setup_test_environment().await;
    let debt = create_test_debt(&store, TEST_OWNER, "Ana", 50.0).await;
    let debts = [debt];

    assert_eq!(summarize(&debts, date!(2024 - 01 - 07)).overdue_count, 0);
    assert_eq!(summarize(&debts, date!(2024 - 01 - 08)).overdue_count, 1);
}

#[test]
fn summary_of_nothing() {
    let summary = summarize(&[], date!(2024 - 01 - 10));

    assert_eq!(summary.count, 0);
    assert_eq!(summary.total_amount, 0.0);
    assert_eq!(summary.overdue_count, 0);
}

#[test]
fn qr_renders_svg() {
    let svg = render_svg("ana@pix|50|Ana").unwrap();

    assert!(svg.contains("<svg"));
    assert!(svg.contains("#000000"));
}

#[test]
fn share_link_points_at_debt_page() {
    assert_eq!(
        share_link("https://cobra.example/", "abc-123"),
        "https://cobra.example/debt?debtId=abc-123"
    );
}
