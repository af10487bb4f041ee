//! JSON-lines order ledger, one append-only file per user.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use drip_commerce::cart::LineItem;
use drip_commerce::checkout::{Address, CustomerInfo, Order, PaymentMethod};
use drip_commerce::ids::{OrderId, UserId};
use drip_commerce::ledger::OrderLedger;
use drip_commerce::money::{Currency, Money};
use drip_commerce::StoreError;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Fixed timestamp format of persisted order records.
pub const DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// One line item inside a persisted order record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordItem {
    pub title: String,
    /// Minor currency units.
    pub price: i64,
    pub quantity: u32,
}

/// The persisted form of an order, one JSON object per ledger line.
///
/// The schema is stable: every field this writes, `to_order` reads back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub order_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Formatted with [`DATE_FORMAT`].
    pub date: String,
    pub items: Vec<RecordItem>,
    /// Minor currency units.
    pub total_bill: i64,
    /// Single-line `street, landmark, city, state` form.
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,
}

impl OrderRecord {
    /// Build the persisted form of an order.
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id.as_str().to_string(),
            username: order.customer.username.as_str().to_string(),
            first_name: order.customer.first_name.clone(),
            last_name: order.customer.last_name.clone(),
            date: order.placed_at.format(DATE_FORMAT).to_string(),
            items: order
                .line_items
                .iter()
                .map(|line| RecordItem {
                    title: line.title.clone(),
                    price: line.unit_price.amount,
                    quantity: line.quantity,
                })
                .collect(),
            total_bill: order.total.amount,
            address: order.shipping_address.one_line(),
            payment: order.payment_method.map(|p| p.as_str().to_string()),
        }
    }

    /// Rebuild the in-memory order. Monetary amounts are re-tagged with
    /// the ledger's currency; the record itself stores raw minor units.
    pub(crate) fn to_order(&self, currency: Currency) -> Result<Order, String> {
        let placed_at = NaiveDateTime::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| format!("bad date {:?}: {}", self.date, e))?;
        let shipping_address = Address::parse(&self.address)
            .map_err(|e| format!("bad address {:?}: {}", self.address, e))?;
        let payment_method = match &self.payment {
            Some(raw) => Some(
                PaymentMethod::from_str(raw).ok_or_else(|| format!("bad payment {:?}", raw))?,
            ),
            None => None,
        };
        Ok(Order {
            id: OrderId::new(self.order_id.clone()),
            customer: CustomerInfo::new(
                self.username.clone(),
                self.first_name.clone(),
                self.last_name.clone(),
            ),
            placed_at,
            line_items: self
                .items
                .iter()
                .map(|item| LineItem {
                    title: item.title.clone(),
                    unit_price: Money::new(item.price, currency),
                    quantity: item.quantity,
                })
                .collect(),
            total: Money::new(self.total_bill, currency),
            shipping_address,
            payment_method,
        })
    }
}

/// Durable order ledger writing one JSON record per line, one file per
/// user, under a single data directory.
#[derive(Debug, Clone)]
pub struct JsonlLedger {
    dir: PathBuf,
    currency: Currency,
}

impl JsonlLedger {
    /// Open a ledger rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>, currency: Currency) -> Result<Self, DataError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(DataError::io(&dir))?;
        Ok(Self { dir, currency })
    }

    /// Path of a user's ledger file.
    pub fn user_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{}_orders.jsonl", username))
    }

    /// Durably append one record to the user's file.
    ///
    /// The write is flushed and synced before this returns: once it does,
    /// the order is committed.
    pub fn append_record(&self, record: &OrderRecord) -> Result<(), DataError> {
        let path = self.user_path(&record.username);
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(DataError::io(&path))?;
        writeln!(file, "{}", line).map_err(DataError::io(&path))?;
        file.sync_all().map_err(DataError::io(&path))?;
        tracing::info!(user = %record.username, order = %record.order_id, "ledger record appended");
        Ok(())
    }

    /// Load every record ever written for a user, oldest first.
    ///
    /// A user with no file has no history; a line that does not parse is
    /// an error, never skipped.
    pub fn load_records(&self, username: &str) -> Result<Vec<OrderRecord>, DataError> {
        let path = self.user_path(username);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(DataError::io(&path))?;
        parse_records(&content, &path)
    }
}

fn parse_records(content: &str, path: &Path) -> Result<Vec<OrderRecord>, DataError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| DataError::Malformed {
                path: path.to_path_buf(),
                line: index + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

impl OrderLedger for JsonlLedger {
    fn append(&mut self, order: &Order) -> Result<(), StoreError> {
        self.append_record(&OrderRecord::from_order(order))
            .map_err(StoreError::from)
    }

    fn history(&self, user: &UserId) -> Result<Vec<Order>, StoreError> {
        let path = self.user_path(user.as_str());
        let records = self.load_records(user.as_str())?;
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_order(self.currency)
                    .map_err(|reason| DataError::Malformed {
                        path: path.clone(),
                        line: index + 1,
                        reason,
                    })
                    .map_err(StoreError::from)
            })
            .collect()
    }
}
