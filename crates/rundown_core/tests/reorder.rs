use rundown_core::{
    Block, BlockId, BlockUpdate, DragOutcome, DragResult, DropRef, EngineError, GatewayError,
    GatewayErrorKind, GatewayResult, Item, ItemUpdate, Journal, PanelBlock, PanelSide, PanelState,
    PanelStore, PersistenceGateway, RundownService, ServiceError,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct GatewayLog {
    item_batches: Vec<Vec<ItemUpdate>>,
    block_batches: Vec<Vec<BlockUpdate>>,
    fail_next: bool,
}

struct MockGateway {
    log: Rc<RefCell<GatewayLog>>,
}

impl MockGateway {
    fn new() -> (Self, Rc<RefCell<GatewayLog>>) {
        let log = Rc::new(RefCell::new(GatewayLog::default()));
        (Self { log: log.clone() }, log)
    }

    fn take_failure(&self) -> Option<GatewayError> {
        let mut log = self.log.borrow_mut();
        if log.fail_next {
            log.fail_next = false;
            return Some(GatewayError::new(
                GatewayErrorKind::Transport,
                "connection_reset",
                "remote store unreachable",
                true,
            ));
        }
        None
    }
}

impl PersistenceGateway for MockGateway {
    fn batch_update_items(&self, updates: &[ItemUpdate]) -> GatewayResult<()> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.log.borrow_mut().item_batches.push(updates.to_vec());
        Ok(())
    }

    fn batch_update_blocks(&self, updates: &[BlockUpdate]) -> GatewayResult<()> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.log.borrow_mut().block_batches.push(updates.to_vec());
        Ok(())
    }

    fn fetch_items_by_block(&self, _block_uuid: BlockId) -> GatewayResult<Vec<Item>> {
        Ok(Vec::new())
    }
}

/// Journal A with blocks A1=[P1,P2,P3] and A2=[R1]; journal B with B1=[Q1].
fn session() -> (RundownService<MockGateway>, Rc<RefCell<GatewayLog>>) {
    let journal_a = Journal::new("Journal A");
    let block_a1 = Block::new(journal_a.uuid, "A1", 1);
    let block_a2 = Block::new(journal_a.uuid, "A2", 2);
    let items_a1 = vec![
        Item::new(block_a1.uuid, 1, 1, "P1"),
        Item::new(block_a1.uuid, 2, 2, "P2"),
        Item::new(block_a1.uuid, 3, 3, "P3"),
    ];
    let items_a2 = vec![Item::new(block_a2.uuid, 1, 4, "R1")];

    let journal_b = Journal::new("Journal B");
    let block_b1 = Block::new(journal_b.uuid, "B1", 1);
    let items_b1 = vec![Item::new(block_b1.uuid, 1, 5, "Q1")];

    let store = PanelStore::new(
        PanelState::with_blocks(
            journal_a,
            vec![
                PanelBlock::new(block_a1, items_a1),
                PanelBlock::new(block_a2, items_a2),
            ],
        ),
        PanelState::with_blocks(journal_b, vec![PanelBlock::new(block_b1, items_b1)]),
    );

    let (gateway, log) = MockGateway::new();
    (RundownService::new(store, gateway), log)
}

fn primary_block(service: &RundownService<MockGateway>, index: usize) -> BlockId {
    service.store().panel(PanelSide::Primary).blocks[index]
        .block
        .uuid
}

#[test]
fn swap_within_block_renumbers_and_keeps_pages() {
    let (mut service, log) = session();
    let block_a1 = primary_block(&service, 0);

    let outcome = service
        .handle_drag(&DragResult::new(
            DropRef::new(block_a1, 0),
            DropRef::new(block_a1, 2),
        ))
        .unwrap();
    assert!(matches!(outcome, DragOutcome::Reordered(_)));

    let items = &service.store().panel(PanelSide::Primary).blocks[0].items;
    let titles: Vec<_> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["P2", "P3", "P1"]);
    let positions: Vec<_> = items.iter().map(|item| item.position).collect();
    assert_eq!(positions, [1, 2, 3]);

    // Pages travel with their items; nothing is restamped within a journal.
    let pages: Vec<_> = items.iter().map(|item| item.page_number).collect();
    assert_eq!(pages, [2, 3, 1]);

    assert_eq!(log.borrow().item_batches.len(), 1);
}

#[test]
fn cross_block_move_within_journal_keeps_page() {
    let (mut service, _log) = session();
    let block_a1 = primary_block(&service, 0);
    let block_a2 = primary_block(&service, 1);

    let receipt = service
        .reorder(&DragResult::new(
            DropRef::new(block_a1, 1),
            DropRef::new(block_a2, 0),
        ))
        .unwrap()
        .unwrap();

    let panel = service.store().panel(PanelSide::Primary);
    assert_eq!(panel.blocks[0].items.len(), 2);
    assert_eq!(panel.blocks[1].items.len(), 2);

    let landed = &panel.blocks[1].items[0];
    assert_eq!(landed.uuid, receipt.item_uuid);
    assert_eq!(landed.title, "P2");
    assert_eq!(landed.block_uuid, block_a2);
    assert_eq!(landed.page_number, 2);
    assert_eq!(landed.position, 1);
}

#[test]
fn closed_journal_rejects_without_any_mutation() {
    let (mut service, log) = session();
    let block_a1 = primary_block(&service, 0);

    let mut closed = service.store().panel(PanelSide::Primary).clone();
    closed.journal.close();
    service.apply_remote_snapshot(PanelSide::Primary, closed.journal, closed.blocks);

    let before = service.store().clone();
    let err = service
        .reorder(&DragResult::new(
            DropRef::new(block_a1, 0),
            DropRef::new(block_a1, 2),
        ))
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Engine(EngineError::JournalClosed { .. })
    ));
    assert_eq!(service.store(), &before);
    assert!(log.borrow().item_batches.is_empty());
}

#[test]
fn persistence_failure_restores_the_panel() {
    let (mut service, log) = session();
    let block_a1 = primary_block(&service, 0);
    let before = service.store().clone();

    log.borrow_mut().fail_next = true;
    let err = service
        .reorder(&DragResult::new(
            DropRef::new(block_a1, 0),
            DropRef::new(block_a1, 2),
        ))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Persistence { .. }));
    assert_eq!(service.store(), &before);
    assert_eq!(service.in_flight(), None);
}

#[test]
fn drag_without_destination_is_a_noop() {
    let (mut service, log) = session();
    let block_a1 = primary_block(&service, 0);
    let before = service.store().clone();

    let outcome = service
        .handle_drag(&DragResult::without_destination(DropRef::new(block_a1, 1)))
        .unwrap();

    assert_eq!(outcome, DragOutcome::Ignored);
    assert_eq!(service.store(), &before);
    assert!(log.borrow().item_batches.is_empty());
}

#[test]
fn cross_panel_drag_is_refused_by_the_reorder_path() {
    let (mut service, _log) = session();
    let block_a1 = primary_block(&service, 0);
    let block_b1 = service.store().panel(PanelSide::Secondary).blocks[0]
        .block
        .uuid;

    let err = service
        .reorder(&DragResult::new(
            DropRef::new(block_a1, 0),
            DropRef::new(block_b1, 0),
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Engine(EngineError::NotWithinOnePanel)
    ));
}

#[test]
fn move_block_persists_new_ranks() {
    let (mut service, log) = session();

    let operation = service.move_block(PanelSide::Primary, 1, 0).unwrap();
    assert!(!operation.is_nil());

    let panel = service.store().panel(PanelSide::Primary);
    assert_eq!(panel.blocks[0].block.display_name, "A2");
    assert_eq!(panel.blocks[0].block.position, 1);
    assert_eq!(panel.blocks[1].block.display_name, "A1");
    assert_eq!(panel.blocks[1].block.position, 2);

    let batches = &log.borrow().block_batches;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
}

#[test]
fn move_block_rolls_back_on_persistence_failure() {
    let (mut service, log) = session();
    let before = service.store().clone();

    log.borrow_mut().fail_next = true;
    let err = service.move_block(PanelSide::Primary, 0, 1).unwrap_err();

    assert!(matches!(err, ServiceError::Persistence { .. }));
    assert_eq!(service.store(), &before);
}
