use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 單筆資料列，欄位以名稱索引（CSV 儲存格皆為字串）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.data.get(column).map(String::as_str)
    }
}

/// 保留欄位順序的資料表；Record 本身的 HashMap 不保證順序
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: Table,
    pub text_column: String,
    pub cleaned_rows: usize,
    pub empty_rows: usize,
    pub csv_output: String,
}
