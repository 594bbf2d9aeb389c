use serde::{Deserialize, Serialize};

use brokerdesk_core::{ServiceError, merge_patch};

// ---------------------------------------------------------------------------
// Bc — the stored document, projected in full on every response
// ---------------------------------------------------------------------------

/// A brokerage contract, addressed by its store-assigned id.
///
/// The business fields are opaque scalars: the backend records whatever the
/// front office sends and never interprets them. Every projection carries
/// the full field set; absent fields read as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bc {
    /// Store-assigned identifier, string on the wire.
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub bc_no: Option<serde_json::Value>,
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default)]
    pub job_no: Option<serde_json::Value>,
    #[serde(default)]
    pub seller: Option<serde_json::Value>,
    #[serde(default)]
    pub buyer: Option<serde_json::Value>,
    #[serde(default)]
    pub commodity: Option<serde_json::Value>,
    #[serde(default)]
    pub origin: Option<serde_json::Value>,
    #[serde(default)]
    pub qty: Option<serde_json::Value>,
    #[serde(default)]
    pub rate: Option<serde_json::Value>,
    #[serde(default)]
    pub nett: Option<serde_json::Value>,
    #[serde(default)]
    pub delivery: Option<serde_json::Value>,
    #[serde(default)]
    pub delivery_loc: Option<serde_json::Value>,
    #[serde(default)]
    pub quality: Option<serde_json::Value>,
    #[serde(default)]
    pub packaging: Option<serde_json::Value>,
    #[serde(default)]
    pub payment: Option<serde_json::Value>,
    #[serde(default)]
    pub brokerage: Option<serde_json::Value>,
    #[serde(default)]
    pub broker: Option<serde_json::Value>,
    #[serde(default)]
    pub kyc: Option<serde_json::Value>,
    #[serde(default)]
    pub terms: Option<serde_json::Value>,
    #[serde(default)]
    pub notes: Option<serde_json::Value>,
    #[serde(default)]
    pub souda: Option<serde_json::Value>,
    #[serde(default)]
    pub bank: Option<serde_json::Value>,

    /// Server-stamped creation time (RFC 3339). Immutable after insert.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Bc {
    /// Build a fresh contract from an input body, with a server-assigned id
    /// and creation timestamp.
    pub fn new(id: String, created_at: String, input: BcInput) -> Self {
        Self {
            id,
            bc_no: input.bc_no,
            date: input.date,
            job_no: input.job_no,
            seller: input.seller,
            buyer: input.buyer,
            commodity: input.commodity,
            origin: input.origin,
            qty: input.qty,
            rate: input.rate,
            nett: input.nett,
            delivery: input.delivery,
            delivery_loc: input.delivery_loc,
            quality: input.quality,
            packaging: input.packaging,
            payment: input.payment,
            brokerage: input.brokerage,
            broker: input.broker,
            kyc: input.kyc,
            terms: input.terms,
            notes: input.notes,
            souda: input.souda,
            bank: input.bank,
            created_at: Some(created_at),
        }
    }

    /// Apply a partial patch and return the merged document.
    ///
    /// Patch keys overwrite, explicit `null` clears, everything else is
    /// untouched. The patch comes from [`BcInput::into_patch`], so `_id`
    /// and `createdAt` can never appear in it.
    pub fn merged(&self, patch: &serde_json::Value) -> Result<Bc, ServiceError> {
        let mut doc =
            serde_json::to_value(self).map_err(|e| ServiceError::Internal(e.to_string()))?;
        merge_patch(&mut doc, patch);
        serde_json::from_value(doc).map_err(|e| ServiceError::Internal(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// BcInput — closed field set accepted from callers
// ---------------------------------------------------------------------------

/// Body for `POST /bcs` and `PUT /bcs/{id}` — any subset of the business
/// fields. Unknown keys are dropped, and `_id`/`createdAt` cannot be set
/// through this type.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BcInput {
    #[serde(default)]
    pub bc_no: Option<serde_json::Value>,
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default)]
    pub job_no: Option<serde_json::Value>,
    #[serde(default)]
    pub seller: Option<serde_json::Value>,
    #[serde(default)]
    pub buyer: Option<serde_json::Value>,
    #[serde(default)]
    pub commodity: Option<serde_json::Value>,
    #[serde(default)]
    pub origin: Option<serde_json::Value>,
    #[serde(default)]
    pub qty: Option<serde_json::Value>,
    #[serde(default)]
    pub rate: Option<serde_json::Value>,
    #[serde(default)]
    pub nett: Option<serde_json::Value>,
    #[serde(default)]
    pub delivery: Option<serde_json::Value>,
    #[serde(default)]
    pub delivery_loc: Option<serde_json::Value>,
    #[serde(default)]
    pub quality: Option<serde_json::Value>,
    #[serde(default)]
    pub packaging: Option<serde_json::Value>,
    #[serde(default)]
    pub payment: Option<serde_json::Value>,
    #[serde(default)]
    pub brokerage: Option<serde_json::Value>,
    #[serde(default)]
    pub broker: Option<serde_json::Value>,
    #[serde(default)]
    pub kyc: Option<serde_json::Value>,
    #[serde(default)]
    pub terms: Option<serde_json::Value>,
    #[serde(default)]
    pub notes: Option<serde_json::Value>,
    #[serde(default)]
    pub souda: Option<serde_json::Value>,
    #[serde(default)]
    pub bank: Option<serde_json::Value>,
}

impl BcInput {
    /// Collapse into a patch object holding only the fields that were
    /// present in the request body. A field sent as `null` stays in the
    /// patch (it clears the stored value); a field left out does not.
    pub fn into_patch(self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        let mut put = |key: &str, val: Option<serde_json::Value>| {
            if let Some(v) = val {
                map.insert(key.to_string(), v);
            }
        };

        put("bcNo", self.bc_no);
        put("date", self.date);
        put("jobNo", self.job_no);
        put("seller", self.seller);
        put("buyer", self.buyer);
        put("commodity", self.commodity);
        put("origin", self.origin);
        put("qty", self.qty);
        put("rate", self.rate);
        put("nett", self.nett);
        put("delivery", self.delivery);
        put("deliveryLoc", self.delivery_loc);
        put("quality", self.quality);
        put("packaging", self.packaging);
        put("payment", self.payment);
        put("brokerage", self.brokerage);
        put("broker", self.broker);
        put("kyc", self.kyc);
        put("terms", self.terms);
        put("notes", self.notes);
        put("souda", self.souda);
        put("bank", self.bank);

        serde_json::Value::Object(map)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
