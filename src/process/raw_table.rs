#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column labels, from the table's `thead` cells in document order.
    pub headers: Vec<String>,
    /// Each `tbody` row, already normalised to text. Rows may be shorter than
    /// `headers`; alignment happens by column name when tables are merged.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}
