//! Transaction model and canonical encoding.

use crate::error::TransactionResult;
use crate::group::GroupId;
use bookmarket_core::constants::{MAX_APP_ARGS, MAX_APP_ARGS_TOTAL_BYTES, MAX_NOTE_BYTES};
use bookmarket_core::hash::sha512_256_prefixed;
use bookmarket_core::io::{
    BinaryWriter, IoError, IoResult, MemoryReader, Serializable, SerializableExt,
};
use bookmarket_core::{Address, AppId, Round};
use std::fmt;
use std::str::FromStr;

/// Maximum size of an approval or clear program.
pub const MAX_PROGRAM_BYTES: usize = 8192;

const MAX_GENESIS_ID_BYTES: usize = 64;

const KIND_PAYMENT: u8 = 1;
const KIND_APPLICATION_CALL: u8 = 2;

/// Domain prefix for transaction ids and signing messages.
pub(crate) const TX_PREFIX: &[u8] = b"TX";

/// Network parameters every transaction is built against.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SuggestedParams {
    /// Suggested fee.
    pub fee: u64,
    /// Minimum fee the network accepts.
    pub min_fee: u64,
    /// First round the transaction is valid in.
    pub first_valid: Round,
    /// Last round the transaction is valid in.
    pub last_valid: Round,
    /// Network name.
    pub genesis_id: String,
    /// Network genesis hash.
    pub genesis_hash: [u8; 32],
}

impl SuggestedParams {
    /// Flat fee charged per transaction.
    pub fn flat_fee(&self) -> u64 {
        self.fee.max(self.min_fee)
    }
}

/// Action taken after an application call's approval program runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum OnComplete {
    /// Plain call.
    #[default]
    NoOp,
    /// Allocate local state.
    OptIn,
    /// Release local state.
    CloseOut,
    /// Release local state unconditionally.
    ClearState,
    /// Replace the programs.
    UpdateApplication,
    /// Delete the application.
    DeleteApplication,
}

impl OnComplete {
    fn to_byte(self) -> u8 {
        match self {
            OnComplete::NoOp => 0,
            OnComplete::OptIn => 1,
            OnComplete::CloseOut => 2,
            OnComplete::ClearState => 3,
            OnComplete::UpdateApplication => 4,
            OnComplete::DeleteApplication => 5,
        }
    }

    fn from_byte(value: u8) -> IoResult<Self> {
        Ok(match value {
            0 => OnComplete::NoOp,
            1 => OnComplete::OptIn,
            2 => OnComplete::CloseOut,
            3 => OnComplete::ClearState,
            4 => OnComplete::UpdateApplication,
            5 => OnComplete::DeleteApplication,
            other => return Err(IoError::Format(format!("unknown on-complete {other}"))),
        })
    }
}

/// Storage slots requested at application creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StateSchema {
    /// Integer slots.
    pub num_uints: u64,
    /// Byte-slice slots.
    pub num_byte_slices: u64,
}

impl Serializable for StateSchema {
    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_u64(self.num_uints);
        writer.write_u64(self.num_byte_slices);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Ok(Self {
            num_uints: reader.read_u64()?,
            num_byte_slices: reader.read_u64()?,
        })
    }
}

/// An application call. `app_id == None` creates a new application.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApplicationCall {
    /// Target application.
    pub app_id: Option<AppId>,
    /// Completion action.
    pub on_complete: OnComplete,
    /// Call arguments.
    pub app_args: Vec<Vec<u8>>,
    /// Compiled approval program (creation only).
    pub approval_program: Vec<u8>,
    /// Compiled clear-state program (creation only).
    pub clear_program: Vec<u8>,
    /// Global storage (creation only).
    pub global_schema: StateSchema,
    /// Local storage (creation only).
    pub local_schema: StateSchema,
}

impl ApplicationCall {
    /// Creates a new application running the given programs.
    pub fn create(
        approval_program: Vec<u8>,
        clear_program: Vec<u8>,
        global_schema: StateSchema,
        local_schema: StateSchema,
        app_args: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            app_id: None,
            on_complete: OnComplete::NoOp,
            app_args,
            approval_program,
            clear_program,
            global_schema,
            local_schema,
        }
    }

    /// Calls an existing application.
    pub fn call(app_id: AppId, app_args: Vec<Vec<u8>>) -> Self {
        Self {
            app_id: Some(app_id),
            app_args,
            ..Self::default()
        }
    }

    /// Deletes an existing application.
    pub fn delete(app_id: AppId) -> Self {
        Self {
            app_id: Some(app_id),
            on_complete: OnComplete::DeleteApplication,
            ..Self::default()
        }
    }

    /// Whether this call creates an application.
    pub fn is_creation(&self) -> bool {
        self.app_id.is_none()
    }
}

impl Serializable for ApplicationCall {
    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_optional(self.app_id.as_ref());
        writer.write_u8(self.on_complete.to_byte());
        writer.write_var_int(self.app_args.len() as u64);
        for arg in &self.app_args {
            writer.write_var_bytes(arg);
        }
        writer.write_var_bytes(&self.approval_program);
        writer.write_var_bytes(&self.clear_program);
        self.global_schema.serialize(writer);
        self.local_schema.serialize(writer);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let app_id = reader.read_optional()?;
        let on_complete = OnComplete::from_byte(reader.read_u8()?)?;
        let arg_count = reader.read_var_int(MAX_APP_ARGS as u64)? as usize;
        let mut app_args = Vec::with_capacity(arg_count);
        for _ in 0..arg_count {
            app_args.push(reader.read_var_bytes(MAX_APP_ARGS_TOTAL_BYTES)?);
        }
        Ok(Self {
            app_id,
            on_complete,
            app_args,
            approval_program: reader.read_var_bytes(MAX_PROGRAM_BYTES)?,
            clear_program: reader.read_var_bytes(MAX_PROGRAM_BYTES)?,
            global_schema: StateSchema::deserialize(reader)?,
            local_schema: StateSchema::deserialize(reader)?,
        })
    }
}

/// What a transaction does.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransactionKind {
    /// Transfer of base units.
    Payment {
        /// Recipient.
        receiver: Address,
        /// Amount in base units.
        amount: u64,
    },
    /// Application call.
    ApplicationCall(ApplicationCall),
}

impl Serializable for TransactionKind {
    fn serialize(&self, writer: &mut BinaryWriter) {
        match self {
            TransactionKind::Payment { receiver, amount } => {
                writer.write_u8(KIND_PAYMENT);
                receiver.serialize(writer);
                writer.write_u64(*amount);
            }
            TransactionKind::ApplicationCall(call) => {
                writer.write_u8(KIND_APPLICATION_CALL);
                call.serialize(writer);
            }
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_u8()? {
            KIND_PAYMENT => Ok(TransactionKind::Payment {
                receiver: Address::deserialize(reader)?,
                amount: reader.read_u64()?,
            }),
            KIND_APPLICATION_CALL => Ok(TransactionKind::ApplicationCall(
                ApplicationCall::deserialize(reader)?,
            )),
            other => Err(IoError::Format(format!("unknown transaction kind {other}"))),
        }
    }
}

/// A ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    /// Paying and authorizing account.
    pub sender: Address,
    /// Fee in base units.
    pub fee: u64,
    /// First valid round.
    pub first_valid: Round,
    /// Last valid round.
    pub last_valid: Round,
    /// Network name.
    pub genesis_id: String,
    /// Network genesis hash.
    pub genesis_hash: [u8; 32],
    /// Arbitrary note.
    pub note: Vec<u8>,
    /// Atomic group membership.
    pub group: Option<GroupId>,
    /// Payload.
    pub kind: TransactionKind,
}

impl Transaction {
    /// Creates an ungrouped transaction without a note.
    pub fn new(sender: Address, params: &SuggestedParams, kind: TransactionKind) -> Self {
        Self {
            sender,
            fee: params.flat_fee(),
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
            note: Vec::new(),
            group: None,
            kind,
        }
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<Vec<u8>>) -> Self {
        self.note = note.into();
        self
    }

    /// Canonical encoding.
    pub fn encode(&self) -> Vec<u8> {
        self.to_array()
    }

    /// Parses a canonical encoding.
    pub fn decode(bytes: &[u8]) -> TransactionResult<Self> {
        Ok(Self::from_array(bytes)?)
    }

    /// Message a signer signs: `"TX" || encoding`.
    pub fn bytes_to_sign(&self) -> Vec<u8> {
        let mut message = TX_PREFIX.to_vec();
        message.extend_from_slice(&self.encode());
        message
    }

    /// Transaction id, covering the group id when one is set.
    pub fn id(&self) -> TxId {
        TxId(sha512_256_prefixed(TX_PREFIX, &self.encode()))
    }

    /// The application call payload, if any.
    pub fn application_call(&self) -> Option<&ApplicationCall> {
        match &self.kind {
            TransactionKind::ApplicationCall(call) => Some(call),
            TransactionKind::Payment { .. } => None,
        }
    }

    /// Payment receiver and amount, if this is a payment.
    pub fn payment(&self) -> Option<(&Address, u64)> {
        match &self.kind {
            TransactionKind::Payment { receiver, amount } => Some((receiver, *amount)),
            TransactionKind::ApplicationCall(_) => None,
        }
    }
}

impl Serializable for Transaction {
    fn serialize(&self, writer: &mut BinaryWriter) {
        self.sender.serialize(writer);
        writer.write_u64(self.fee);
        self.first_valid.serialize(writer);
        self.last_valid.serialize(writer);
        writer.write_var_string(&self.genesis_id);
        writer.write_bytes(&self.genesis_hash);
        writer.write_var_bytes(&self.note);
        writer.write_optional(self.group.as_ref());
        self.kind.serialize(writer);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Ok(Self {
            sender: Address::deserialize(reader)?,
            fee: reader.read_u64()?,
            first_valid: Round::deserialize(reader)?,
            last_valid: Round::deserialize(reader)?,
            genesis_id: reader.read_var_string(MAX_GENESIS_ID_BYTES)?,
            genesis_hash: reader.read_array()?,
            note: reader.read_var_bytes(MAX_NOTE_BYTES)?,
            group: reader.read_optional()?,
            kind: TransactionKind::deserialize(reader)?,
        })
    }
}

/// Transaction identifier.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TxId(pub [u8; 32]);

impl TxId {
    /// Raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({self})")
    }
}

impl FromStr for TxId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim()).map_err(|e| format!("invalid tx id {s}: {e}"))?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| format!("invalid tx id {s}: expected 32 bytes"))?;
        Ok(Self(array))
    }
}

impl TryFrom<String> for TxId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TxId> for String {
    fn from(value: TxId) -> Self {
        value.to_string()
    }
}
