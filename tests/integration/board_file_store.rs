//! Pipeline board behaviour over the JSON-file store

use chrono::{TimeZone, Utc};
use std::fs;

use dealboard::error::BoardError;
use dealboard::models::deal::{DealDraft, DealStage};
use dealboard::models::filter::{FilterState, StageFilter, ValueRange};
use dealboard::pipeline::DropOutcome;
use dealboard::store::{DealStore, FileDealStore};

use super::helpers::*;

#[test]
fn test_move_persists_and_shifts_stage_totals() {
    let (_temp, data_dir) = init_data_dir();
    let mut board = seeded_board(
        &data_dir,
        &[
            deal(1, "Renewal", 4000.0, DealStage::New, Some(1)),
            deal(2, "Expansion", 6000.0, DealStage::Proposal, Some(1)),
        ],
        &[contact(1, "Sarah Johnson")],
    );

    let outcome = board
        .move_deal(1, DealStage::Proposal)
        .expect("move should succeed");

    match outcome {
        DropOutcome::Moved { deal, from } => {
            assert_eq!(from, DealStage::New);
            assert_eq!(deal.stage, DealStage::Proposal);
        }
        other => panic!("expected a move, got {other:?}"),
    }
    assert_eq!(board.stage_total(DealStage::Proposal), 10000.0);
    assert_eq!(board.stage_total(DealStage::New), 0.0);
    assert!(board.dragging().is_none());

    let reloaded = reopen(&data_dir);
    assert_eq!(reloaded.deal(1).unwrap().stage, DealStage::Proposal);
    assert_eq!(reloaded.stage_total(DealStage::Proposal), 10000.0);
}

#[test]
fn test_drop_on_current_stage_leaves_file_untouched() {
    let (_temp, data_dir) = init_data_dir();
    let mut board = seeded_board(
        &data_dir,
        &[deal(1, "Renewal", 4000.0, DealStage::Qualified, None)],
        &[],
    );
    let before = fs::read_to_string(data_dir.deals_path()).unwrap();

    let outcome = board.move_deal(1, DealStage::Qualified).unwrap();

    assert_eq!(outcome, DropOutcome::Unchanged);
    assert_eq!(fs::read_to_string(data_dir.deals_path()).unwrap(), before);
}

#[test]
fn test_move_of_externally_deleted_deal_keeps_cache() {
    let (_temp, data_dir) = init_data_dir();
    let mut board = seeded_board(
        &data_dir,
        &[deal(1, "Renewal", 4000.0, DealStage::New, None)],
        &[],
    );

    // Another process removes the record after the board loaded it.
    FileDealStore::in_data_dir(&data_dir).delete(1).unwrap();

    let err = board.move_deal(1, DealStage::ClosedWon).unwrap_err();

    assert!(matches!(
        err,
        BoardError::StageUpdate {
            id: 1,
            stage: DealStage::ClosedWon,
            ..
        }
    ));
    assert_eq!(board.deal(1).unwrap().stage, DealStage::New);
    assert!(board.dragging().is_none());
}

#[test]
fn test_filters_narrow_columns_and_totals() {
    let (_temp, data_dir) = init_data_dir();
    let mut board = seeded_board(
        &data_dir,
        &[
            deal(1, "Small", 5000.0, DealStage::New, None),
            deal(2, "Medium", 25000.0, DealStage::New, None),
            deal(3, "Large", 150000.0, DealStage::Negotiation, None),
        ],
        &[],
    );

    board.set_filters(FilterState::new(
        StageFilter::All,
        ValueRange::Between {
            min: 10000.0,
            max: 50000.0,
        },
    ));
    let columns = board.columns();
    assert_eq!(columns.len(), 6);
    assert_eq!(columns[0].count(), 1);
    assert_eq!(columns[0].total, 25000.0);
    assert!(columns[3].is_empty());

    board.filters_mut().set_value_range(ValueRange::AtLeast { min: 100000.0 });
    board
        .filters_mut()
        .set_stage(StageFilter::Only(DealStage::Negotiation));
    let filtered = board.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Large");

    board.filters_mut().clear();
    assert_eq!(board.filtered().len(), 3);
}

#[test]
fn test_save_deal_creates_and_edits_on_disk() {
    let (_temp, data_dir) = init_data_dir();
    let mut board = seeded_board(
        &data_dir,
        &[deal(4, "Existing", 1000.0, DealStage::New, Some(1))],
        &[contact(1, "Michael Chen")],
    );

    let draft = DealDraft {
        contact_id: Some(1),
        close_date: Some(Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap()),
        ..DealDraft::new("Data Platform", 32000.0)
    };
    let created = board.save_deal(None, draft).unwrap();
    assert_eq!(created.id, 5);
    assert_eq!(created.stage, DealStage::New);
    assert_eq!(created.probability, 10);

    let mut edit = DealDraft::from_deal(&created);
    edit.stage = DealStage::Qualified;
    edit.probability = 40;
    board.save_deal(Some(created.id), edit).unwrap();

    let reloaded = reopen(&data_dir);
    let stored = reloaded.deal(5).unwrap();
    assert_eq!(stored.stage, DealStage::Qualified);
    assert_eq!(stored.probability, 40);
    assert_eq!(reloaded.contact_name(stored), "Michael Chen");
}

#[test]
fn test_invalid_draft_is_not_written() {
    let (_temp, data_dir) = init_data_dir();
    let mut board = seeded_board(&data_dir, &[], &[]);

    let err = board
        .save_deal(None, DealDraft::new("  ", 0.0))
        .unwrap_err();

    let BoardError::Invalid(errors) = err else {
        panic!("expected validation errors");
    };
    assert!(errors.get("title").is_some());
    assert!(errors.get("value").is_some());
    assert!(errors.get("contactId").is_some());
    assert!(errors.get("closeDate").is_some());
    assert!(reopen(&data_dir).deals().is_empty());
}

#[test]
fn test_delete_removes_record_from_file() {
    let (_temp, data_dir) = init_data_dir();
    let mut board = seeded_board(
        &data_dir,
        &[
            deal(1, "Keep", 1000.0, DealStage::New, None),
            deal(2, "Drop", 2000.0, DealStage::New, None),
        ],
        &[],
    );

    board.delete_deal(2).unwrap();

    assert!(board.deal(2).is_none());
    let reloaded = reopen(&data_dir);
    assert_eq!(reloaded.deals().len(), 1);
    assert_eq!(reloaded.deals()[0].title, "Keep");
}

#[test]
fn test_failed_reload_keeps_previous_cache() {
    let (_temp, data_dir) = init_data_dir();
    let mut board = seeded_board(
        &data_dir,
        &[deal(1, "Renewal", 4000.0, DealStage::New, None)],
        &[contact(1, "Emily Rodriguez")],
    );

    fs::write(data_dir.contacts_path(), "{ not json").unwrap();

    let err = board.load().unwrap_err();

    assert!(matches!(err, BoardError::Load(_)));
    assert_eq!(board.deals().len(), 1);
    assert_eq!(board.contacts().len(), 1);
}

#[test]
fn test_two_stores_on_one_file_do_not_reuse_ids() {
    let (_temp, data_dir) = init_data_dir();
    let first = FileDealStore::in_data_dir(&data_dir);
    let second = FileDealStore::in_data_dir(&data_dir);

    let a = first.create(DealDraft::new("A", 1.0)).unwrap();
    let b = second.create(DealDraft::new("B", 2.0)).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(first.fetch_all().unwrap().len(), 2);
}
