//! Transaction registration payload.

use crate::domain::foundation::{
    attribute_accessors, Attributes, IntoAttributeValue, Model, PayloadDefaults, Przelewy24Error,
    Signable,
};

use super::constants::{Currency, Encoding, Language, API_VERSION};
use super::item::Item;

/// Payload for the `trnRegister` endpoint.
///
/// Owns its line items; they are flattened into the wire attributes in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    attributes: Attributes,
    items: Vec<Item>,
}

impl Transaction {
    /// Create a transaction pre-filled with merchant ids, protocol defaults and configured URLs.
    pub fn new(defaults: &PayloadDefaults) -> Self {
        let mut attributes = Attributes::new(Self::FILLABLE);
        defaults.fill(&mut attributes);

        let mut transaction = Self {
            attributes,
            items: Vec::new(),
        };
        transaction
            .set_api_version(API_VERSION)
            .set_encoding(Encoding::Utf8)
            .set_language(Language::Pl)
            .set_currency(Currency::Pln)
            .set_url_status(defaults.url_status.as_deref())
            .set_url_return(defaults.url_return.as_deref());
        transaction
    }

    attribute_accessors! {
        merchant_id => set_merchant_id,
        pos_id => set_pos_id,
        session_id => set_session_id,
        amount => set_amount,
        currency => set_currency,
        description => set_description,
        email => set_email,
        client => set_client,
        address => set_address,
        zip => set_zip,
        city => set_city,
        country => set_country,
        phone => set_phone,
        language => set_language,
        method => set_method,
        url_return => set_url_return,
        url_status => set_url_status,
        time_limit => set_time_limit,
        wait_for_result => set_wait_for_result,
        channel => set_channel,
        shipping => set_shipping,
        transfer_label => set_transfer_label,
        api_version => set_api_version,
        encoding => set_encoding,
    }

    /// Append an item; its position fixes the wire suffix.
    pub fn add_item(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Build an item from name/value pairs and append it.
    ///
    /// Fails without touching the transaction when a name is not an item field.
    pub fn add_item_attributes<I, K, V>(&mut self, entries: I) -> Result<&mut Self, Przelewy24Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoAttributeValue,
    {
        let mut item = Item::new();
        item.set_many(entries)?;
        Ok(self.add_item(item))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Model for Transaction {
    const FILLABLE: &'static [&'static str] = &[
        "merchant_id",
        "pos_id",
        "session_id",
        "amount",
        "currency",
        "description",
        "email",
        "client",
        "address",
        "zip",
        "city",
        "country",
        "phone",
        "language",
        "method",
        "url_return",
        "url_status",
        "time_limit",
        "wait_for_result",
        "channel",
        "shipping",
        "transfer_label",
        "api_version",
        "encoding",
    ];

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn form_attributes(&self) -> Vec<(String, String)> {
        let mut result = self.attributes.to_pairs();
        for (index, item) in self.items.iter().enumerate() {
            result.extend(item.indexed_attributes(index + 1));
        }
        result
    }
}

impl Signable for Transaction {
    const SIGNABLE: &'static [&'static str] = &["session_id", "merchant_id", "amount", "currency"];
}
