//! Remark box model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::RemarkCategory;
use super::sheet::{cell, format_sheet_date, parse_sheet_date};
use super::validation::not_blank;

pub mod columns {
    pub const DATE: usize = 1;
    pub const AUTHOR: usize = 2;
    pub const TEXT: usize = 3;
    pub const CATEGORY: usize = 4;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Remark {
    pub date: Option<NaiveDate>,
    pub author: String,
    pub text: String,
    pub category: String,
}

impl Remark {
    pub fn from_row(row: &[String]) -> Option<Self> {
        let text = cell(row, columns::TEXT);
        if text.is_empty() {
            return None;
        }

        Some(Self {
            date: parse_sheet_date(cell(row, columns::DATE)),
            author: cell(row, columns::AUTHOR).to_string(),
            text: text.to_string(),
            category: cell(row, columns::CATEGORY).to_string(),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.map(format_sheet_date).unwrap_or_default(),
            self.author.clone(),
            self.text.clone(),
            self.category.clone(),
        ]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRemark {
    #[validate(custom(function = "not_blank", message = "Author is required"))]
    pub author: String,
    pub category: RemarkCategory,
    #[validate(custom(function = "not_blank", message = "Text is required"))]
    pub text: String,
}
