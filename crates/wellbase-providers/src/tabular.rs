use crate::error::Result;
use csv::{ByteRecord, ReaderBuilder};
use wellbase_types::{Record, Value};

/// Fields kept as text during numeric decoding unless configured otherwise.
pub const DEFAULT_LABEL_FIELDS: [&str; 3] = ["month", "well", "name"];

/// Decodes CSV bytes (header row first) into ordered records.
///
/// Two flavors are offered: [`CsvDecoder::decode`] keeps every cell as text,
/// [`CsvDecoder::decode_numeric`] parses every cell as a float except the
/// configured label fields. Unparsable numbers become [`Value::Missing`].
#[derive(Debug, Clone)]
pub struct CsvDecoder {
    label_fields: Vec<String>,
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self::with_label_fields(DEFAULT_LABEL_FIELDS)
    }
}

impl CsvDecoder {
    pub fn with_label_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_label(&self, field: &str) -> bool {
        self.label_fields.iter().any(|f| f == field)
    }

    /// Decode with every value kept as a string.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        self.decode_rows(bytes, false)
    }

    /// Decode with numeric coercion of all non-label fields.
    pub fn decode_numeric(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        self.decode_rows(bytes, true)
    }

    fn decode_rows(&self, bytes: &[u8], numeric: bool) -> Result<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();

        // Flexible byte records: ragged rows and invalid UTF-8 never fail a read
        let mut rows = Vec::new();
        let mut raw = ByteRecord::new();
        while reader.read_byte_record(&mut raw)? {
            rows.push(self.to_record(&headers, &raw, numeric));
        }
        Ok(rows)
    }

    fn to_record(&self, headers: &[String], raw: &ByteRecord, numeric: bool) -> Record {
        let mut record = Record::new();
        for (i, cell) in raw.iter().enumerate() {
            let key = headers
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("_{}", i));
            let text = String::from_utf8_lossy(cell);
            let value = if numeric && !self.is_label(&key) {
                Value::numeric(&text)
            } else {
                Value::String(text.into_owned())
            };
            record.insert(key, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_decode_keeps_month_as_text() -> Result<()> {
        let rows = CsvDecoder::default().decode_numeric(b"month,rate\nJan,123.4\n")?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("month"), Some(&Value::from("Jan")));
        assert_eq!(rows[0].get("rate"), Some(&Value::Float(123.4)));
        Ok(())
    }

    #[test]
    fn test_unparsable_numbers_become_missing() -> Result<()> {
        let rows = CsvDecoder::default().decode_numeric(b"well,oil,water\nW1,abc,\n")?;
        assert_eq!(rows[0].get("well"), Some(&Value::from("W1")));
        assert_eq!(rows[0].get("oil"), Some(&Value::Missing));
        assert_eq!(rows[0].get("water"), Some(&Value::Missing));
        Ok(())
    }

    #[test]
    fn test_string_decode_does_not_coerce() -> Result<()> {
        let rows = CsvDecoder::default().decode(b"name,oil\nW1,12\n")?;
        assert_eq!(rows[0].get("oil"), Some(&Value::from("12")));
        Ok(())
    }

    #[test]
    fn test_custom_label_fields() -> Result<()> {
        let decoder = CsvDecoder::with_label_fields(["date"]);
        let rows = decoder.decode_numeric(b"date,month\n2023-01,7\n")?;
        assert_eq!(rows[0].get("date"), Some(&Value::from("2023-01")));
        assert_eq!(rows[0].get("month"), Some(&Value::Float(7.0)));
        Ok(())
    }

    #[test]
    fn test_ragged_rows_are_kept() -> Result<()> {
        let rows = CsvDecoder::default().decode(b"a,b\n1\n2,3,4\n")?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].get("_2"), Some(&Value::from("4")));
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_cells_are_lossy() -> Result<()> {
        let rows = CsvDecoder::default().decode(b"well,oil\nW\xff1,12\n")?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str("well"), Some("W\u{fffd}1"));
        Ok(())
    }

    #[test]
    fn test_empty_input_has_no_rows() -> Result<()> {
        assert!(CsvDecoder::default().decode(b"")?.is_empty());
        assert!(CsvDecoder::default().decode(b"a,b\n")?.is_empty());
        Ok(())
    }
}
