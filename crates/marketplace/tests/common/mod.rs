//! In-memory ledger node and indexer.
//!
//! Decodes signed blobs, checks signatures and group ids, and applies the
//! listing contract's observable behaviour: creation, purchase, like,
//! dislike and owner-only deletion.

#![allow(dead_code)]

use async_trait::async_trait;
use bookmarket_config::{MarketplaceConfig, DEFAULT_MARKER};
use bookmarket_core::codec::{decode_uint64, encode_text};
use bookmarket_core::{fields, methods, Address, AppId, Round};
use bookmarket_marketplace::{ContractPrograms, Marketplace};
use bookmarket_rpc_client::models::{ApplicationParams, IndexedTransaction, TealKeyValue};
use bookmarket_rpc_client::{
    ApplicationRecord, ClientRpcError, IndexerApi, LedgerApi, NodeStatus, PendingTransaction,
    RpcResult, TransactionPage, TransactionSearch,
};
use bookmarket_transaction::{
    verify_group, OnComplete, SignedTransaction, SuggestedParams, Transaction, TransactionKind,
    TxId,
};
use bookmarket_wallets::{KeyPair, LocalSigner, TransactionSigner};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const FIRST_APP_ID: u64 = 1000;

#[derive(Debug, Clone)]
pub struct FakeApp {
    pub creator: Address,
    pub deleted: bool,
    pub global_state: Vec<TealKeyValue>,
}

impl FakeApp {
    fn uint(&self, field: &str) -> u64 {
        let key = encode_text(field);
        self.global_state
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| kv.value.uint)
            .unwrap_or(0)
    }

    fn add(&mut self, field: &str, delta: u64) {
        let key = encode_text(field);
        let value = self.uint(field) + delta;
        self.global_state.retain(|kv| kv.key != key);
        self.global_state.push(TealKeyValue::uint(key, value));
    }
}

#[derive(Debug, Default)]
struct State {
    round: u64,
    next_app_id: u64,
    balances: HashMap<Address, u64>,
    apps: BTreeMap<u64, FakeApp>,
    indexed: Vec<(Vec<u8>, u64, IndexedTransaction)>,
    pending: HashMap<TxId, PendingTransaction>,
    broken_lookups: HashSet<u64>,
    submissions: Vec<Vec<SignedTransaction>>,
    hold_confirmation: bool,
    round_stride: u64,
    pending_polls: usize,
    fail_search: bool,
    page_size: Option<usize>,
}

#[derive(Debug)]
pub struct FakeLedger {
    marker: Vec<u8>,
    state: Mutex<State>,
}

impl Default for FakeLedger {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl FakeLedger {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.as_bytes().to_vec(),
            state: Mutex::new(State {
                round: 100,
                next_app_id: FIRST_APP_ID,
                ..State::default()
            }),
        }
    }

    pub fn fund(&self, address: Address, amount: u64) {
        *self.state.lock().unwrap().balances.entry(address).or_default() += amount;
    }

    pub fn balance_of(&self, address: &Address) -> u64 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(address)
            .copied()
            .unwrap_or(0)
    }

    pub fn app(&self, app_id: AppId) -> Option<FakeApp> {
        self.state.lock().unwrap().apps.get(&app_id.value()).cloned()
    }

    pub fn submissions(&self) -> Vec<Vec<SignedTransaction>> {
        self.state.lock().unwrap().submissions.clone()
    }

    pub fn round(&self) -> u64 {
        self.state.lock().unwrap().round
    }

    /// Accept submissions but never confirm them.
    pub fn hold_confirmations(&self) {
        self.state.lock().unwrap().hold_confirmation = true;
    }

    /// Each wait for a new block jumps `stride` rounds ahead.
    pub fn skip_rounds(&self, stride: u64) {
        self.state.lock().unwrap().round_stride = stride;
    }

    pub fn pending_polls(&self) -> usize {
        self.state.lock().unwrap().pending_polls
    }

    /// Make application lookups for `app_id` fail.
    pub fn break_lookup(&self, app_id: AppId) {
        self.state.lock().unwrap().broken_lookups.insert(app_id.value());
    }

    /// Make the transaction search fail.
    pub fn fail_search(&self) {
        self.state.lock().unwrap().fail_search = true;
    }

    /// Serve search results in pages of `size`.
    pub fn paginate(&self, size: usize) {
        self.state.lock().unwrap().page_size = Some(size);
    }

    /// Overwrites a global-state entry of an application.
    pub fn set_state(&self, app_id: AppId, entry: TealKeyValue) {
        let mut state = self.state.lock().unwrap();
        if let Some(app) = state.apps.get_mut(&app_id.value()) {
            app.global_state.retain(|kv| kv.key != entry.key);
            app.global_state.push(entry);
        }
    }

    /// Adds an application created outside the marketplace client.
    pub fn insert_app(&self, creator: Address, note: &[u8], global_state: Vec<TealKeyValue>) -> AppId {
        let mut state = self.state.lock().unwrap();
        let app_id = state.next_app_id;
        state.next_app_id += 1;
        state.round += 1;
        let round = state.round;
        state.apps.insert(
            app_id,
            FakeApp {
                creator,
                deleted: false,
                global_state,
            },
        );
        state.indexed.push((
            note.to_vec(),
            round,
            IndexedTransaction {
                id: format!("external-{app_id}"),
                created_application_index: Some(app_id),
                confirmed_round: Some(round),
                sender: creator.to_string(),
            },
        ));
        AppId(app_id)
    }

    fn apply(&self, state: &mut State, group: &[Transaction]) -> Result<Option<u64>, String> {
        let first = &group[0];
        let call = match &first.kind {
            TransactionKind::ApplicationCall(call) => call,
            TransactionKind::Payment { .. } => {
                for tx in group {
                    self.transfer(state, tx)?;
                }
                return Ok(None);
            }
        };

        let Some(app_id) = call.app_id else {
            return self.create(state, first).map(Some);
        };
        let app = state
            .apps
            .get(&app_id.value())
            .filter(|app| !app.deleted)
            .cloned()
            .ok_or_else(|| format!("application {app_id} does not exist"))?;

        if call.on_complete == OnComplete::DeleteApplication {
            if first.sender != app.creator {
                return Err("logic eval error: only the creator may delete".into());
            }
            if let Some(app) = state.apps.get_mut(&app_id.value()) {
                app.deleted = true;
            }
            return Ok(None);
        }

        let method = call.app_args.first().map(Vec::as_slice).unwrap_or_default();
        if method == methods::BUY.as_bytes() {
            if group.len() != 2 {
                return Err("logic eval error: buy needs a group of 2".into());
            }
            let count = call
                .app_args
                .get(1)
                .ok_or("logic eval error: missing count")
                .and_then(|arg| decode_uint64(arg).map_err(|_| "logic eval error: bad count"))?;
            let Some((receiver, amount)) = group[1].payment() else {
                return Err("logic eval error: second member must be a payment".into());
            };
            if *receiver != app.creator
                || group[1].sender != first.sender
                || amount != app.uint(fields::PRICE) * count
            {
                return Err("logic eval error: invalid payment".into());
            }
            self.transfer(state, &group[1])?;
            if let Some(app) = state.apps.get_mut(&app_id.value()) {
                app.add(fields::SOLD, count);
            }
            Ok(None)
        } else if method == methods::LIKES.as_bytes() || method == methods::DISLIKES.as_bytes() {
            if group.len() != 1 {
                return Err("logic eval error: group size must be 1".into());
            }
            let field = if method == methods::LIKES.as_bytes() {
                fields::LIKES
            } else {
                fields::DISLIKES
            };
            if let Some(app) = state.apps.get_mut(&app_id.value()) {
                app.add(field, 1);
            }
            Ok(None)
        } else {
            Err("logic eval error: unknown method".into())
        }
    }

    fn create(&self, state: &mut State, tx: &Transaction) -> Result<u64, String> {
        let call = tx.application_call().ok_or("not an application call")?;
        if call.app_args.len() != 5 {
            return Err("logic eval error: creation needs 5 arguments".into());
        }
        if tx.note != self.marker {
            return Err("logic eval error: wrong note".into());
        }
        let price = decode_uint64(&call.app_args[3]).map_err(|e| e.to_string())?;
        if price == 0 {
            return Err("logic eval error: price must be positive".into());
        }
        if call.approval_program.is_empty() || call.clear_program.is_empty() {
            return Err("missing programs".into());
        }
        let text = |i: usize| String::from_utf8(call.app_args[i].clone()).map_err(|e| e.to_string());
        let global_state = vec![
            TealKeyValue::bytes(encode_text(fields::NAME), encode_text(&text(0)?)),
            TealKeyValue::bytes(encode_text(fields::IMAGE), encode_text(&text(1)?)),
            TealKeyValue::bytes(encode_text(fields::DESCRIPTION), encode_text(&text(2)?)),
            TealKeyValue::uint(encode_text(fields::PRICE), price),
            TealKeyValue::uint(encode_text(fields::SOLD), 0),
        ];
        let app_id = state.next_app_id;
        state.next_app_id += 1;
        state.apps.insert(
            app_id,
            FakeApp {
                creator: tx.sender,
                deleted: false,
                global_state,
            },
        );
        state.indexed.push((
            tx.note.clone(),
            state.round + 1,
            IndexedTransaction {
                id: tx.id().to_string(),
                created_application_index: Some(app_id),
                confirmed_round: Some(state.round + 1),
                sender: tx.sender.to_string(),
            },
        ));
        Ok(app_id)
    }

    fn transfer(&self, state: &mut State, tx: &Transaction) -> Result<(), String> {
        let Some((receiver, amount)) = tx.payment() else {
            return Ok(());
        };
        let available = state.balances.get(&tx.sender).copied().unwrap_or(0);
        if available < amount {
            return Err(format!("overspend: {} has {available}, needs {amount}", tx.sender));
        }
        state.balances.insert(tx.sender, available - amount);
        *state.balances.entry(*receiver).or_default() += amount;
        Ok(())
    }
}

#[async_trait]
impl LedgerApi for FakeLedger {
    async fn suggested_params(&self) -> RpcResult<SuggestedParams> {
        let round = self.round();
        Ok(SuggestedParams {
            fee: 0,
            min_fee: 1000,
            first_valid: Round(round),
            last_valid: Round(round + 1000),
            genesis_id: "fakenet-v1".to_string(),
            genesis_hash: [7u8; 32],
        })
    }

    async fn compile(&self, source: &str) -> RpcResult<Vec<u8>> {
        let mut program = vec![0x06];
        program.extend_from_slice(source.as_bytes());
        Ok(program)
    }

    async fn send_raw_transactions(&self, blobs: &[Vec<u8>]) -> RpcResult<TxId> {
        let reject = |message: String| ClientRpcError::new(400, message);
        let signed = blobs
            .iter()
            .map(|blob| SignedTransaction::decode(blob).map_err(|e| reject(e.to_string())))
            .collect::<RpcResult<Vec<_>>>()?;
        for tx in &signed {
            tx.verify().map_err(|e| reject(e.to_string()))?;
        }
        let group: Vec<Transaction> = signed.iter().map(|s| s.transaction.clone()).collect();
        verify_group(&group).map_err(|e| reject(e.to_string()))?;
        let tx_id = group[0].id();

        let mut state = self.state.lock().unwrap();
        state.submissions.push(signed);
        let created = self.apply(&mut state, &group).map_err(reject)?;
        if state.hold_confirmation {
            state.pending.insert(tx_id, PendingTransaction::default());
        } else {
            state.round += 1;
            let round = state.round;
            state.pending.insert(
                tx_id,
                PendingTransaction {
                    confirmed_round: Some(round),
                    application_index: created,
                    pool_error: String::new(),
                },
            );
        }
        Ok(tx_id)
    }

    async fn pending_transaction(&self, tx_id: &TxId) -> RpcResult<PendingTransaction> {
        let mut state = self.state.lock().unwrap();
        state.pending_polls += 1;
        state
            .pending
            .get(tx_id)
            .cloned()
            .ok_or_else(|| ClientRpcError::new(404, "transaction not found"))
    }

    async fn status(&self) -> RpcResult<NodeStatus> {
        Ok(NodeStatus {
            last_round: self.round(),
        })
    }

    async fn status_after_round(&self, round: Round) -> RpcResult<NodeStatus> {
        let mut state = self.state.lock().unwrap();
        let stride = state.round_stride.max(1);
        state.round = state.round.max(round.value() + stride);
        Ok(NodeStatus {
            last_round: state.round,
        })
    }

    async fn account_balance(&self, address: &Address) -> RpcResult<u64> {
        Ok(self.balance_of(address))
    }
}

#[async_trait]
impl IndexerApi for FakeLedger {
    async fn search_transactions(&self, search: &TransactionSearch) -> RpcResult<TransactionPage> {
        let state = self.state.lock().unwrap();
        if state.fail_search {
            return Err(ClientRpcError::transport("indexer unavailable"));
        }
        assert_eq!(search.tx_type.as_deref(), Some("appl"));
        let prefix = search
            .note_prefix
            .as_deref()
            .map(|p| {
                bookmarket_core::codec::decode_bytes(p).expect("note prefix is base64")
            })
            .unwrap_or_default();
        let min_round = search.min_round.map(Round::value).unwrap_or(0);
        let matching: Vec<IndexedTransaction> = state
            .indexed
            .iter()
            .filter(|(note, round, tx)| {
                note.starts_with(&prefix)
                    && *round >= min_round
                    && search
                        .application_id
                        .map_or(true, |id| tx.created_application() == Some(id))
            })
            .map(|(_, _, tx)| tx.clone())
            .collect();

        let offset: usize = search
            .next
            .as_deref()
            .map(|token| token.parse().expect("numeric token"))
            .unwrap_or(0);
        let size = state.page_size.unwrap_or(usize::MAX);
        let page: Vec<_> = matching.iter().skip(offset).take(size).cloned().collect();
        let end = offset + page.len();
        Ok(TransactionPage {
            current_round: state.round,
            next_token: (end < matching.len()).then(|| end.to_string()),
            transactions: page,
        })
    }

    async fn lookup_application(
        &self,
        app_id: AppId,
        include_all: bool,
    ) -> RpcResult<Option<ApplicationRecord>> {
        let state = self.state.lock().unwrap();
        if state.broken_lookups.contains(&app_id.value()) {
            return Err(ClientRpcError::new(500, "indexer lookup failed"));
        }
        Ok(state
            .apps
            .get(&app_id.value())
            .filter(|app| include_all || !app.deleted)
            .map(|app| ApplicationRecord {
                id: app_id.value(),
                deleted: app.deleted,
                created_at_round: None,
                params: ApplicationParams {
                    creator: app.creator.to_string(),
                    global_state: app.global_state.clone(),
                },
            }))
    }
}

pub struct Harness {
    pub ledger: Arc<FakeLedger>,
    pub market: Marketplace,
    pub seller: KeyPair,
    pub buyer: KeyPair,
    pub config: MarketplaceConfig,
}

pub fn programs() -> ContractPrograms {
    ContractPrograms::new("#pragma version 6\nint 1\n", "#pragma version 6\nint 1\n")
}

impl Harness {
    pub fn new() -> Self {
        let seller = KeyPair::generate();
        let buyer = KeyPair::generate();
        let signer = LocalSigner::new()
            .with_key(seller.clone())
            .with_key(buyer.clone());
        Self::with_signer(seller, buyer, Arc::new(signer))
    }

    pub fn with_signer(
        seller: KeyPair,
        buyer: KeyPair,
        signer: Arc<dyn TransactionSigner>,
    ) -> Self {
        let config = MarketplaceConfig::default();
        let ledger = Arc::new(FakeLedger::new(&config.contract.marker));
        ledger.fund(buyer.address(), 100_000_000);
        let market = Marketplace::new(
            &config,
            ledger.clone(),
            ledger.clone(),
            signer,
            programs(),
        );
        Self {
            ledger,
            market,
            seller,
            buyer,
            config,
        }
    }
}
