// src/records/rating.rs
use super::record;

record! {
    /// One ranked boxer on a ratings page.
    pub struct RatingRow / RatingRowBuilder {
        br_rating: u32 = 0,
        br_boxer_id: u64 = 0,
        boxer_name: String = String::new(),
        br_points: f64 = 0.0,
        weightclass: String = String::new(),
        /// `"<wins>-<losses>-<draws>"`
        boxer_wld: String = String::new(),
        bout_tot: u32 = 0,
        win_tot: u32 = 0,
        loss_tot: u32 = 0,
        draw_tot: u32 = 0,
        career_date_span: String = String::new(),
        career_start_year: i32 = 0,
        career_end_year: i32 = 0,
    }
}

/// Everything one ratings page yielded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingPage {
    pub rows: Vec<RatingRow>,
    /// Cell texts of rows that failed coercion, kept for diagnostics only.
    pub error_rows: Vec<Vec<String>>,
}
