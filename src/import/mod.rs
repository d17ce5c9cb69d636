mod csv_import;

pub(crate) use csv_import::{export_series, parse_date, parse_decimal, CsvImporter};
