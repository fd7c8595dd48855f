// src/records/profile.rs
use chrono::NaiveDate;

use super::record;

record! {
    /// A boxer's career snapshot from their profile page.
    pub struct BoxerProfile / BoxerProfileBuilder {
        br_boxer_id: u64 = 0,
        boxer_name: String = String::new(),
        weightclass: String = String::new(),
        boxer_win_tot: u32 = 0,
        boxer_loss_tot: u32 = 0,
        boxer_draw_tot: u32 = 0,
        boxer_bouts_tot: u32 = 0,
        boxer_rounds_tot: u32 = 0,
        boxer_ko_win_tot: u32 = 0,
        boxer_ko_loss_tot: u32 = 0,
        boxer_kos_pct: f64 = 0.0,
        /// `boxer_win_tot / boxer_bouts_tot`
        boxer_wins_pct: f64 = 0.0,

        boxer_alias_name: String = String::new(),
        boxer_birth_name: String = String::new(),
        /// Raw `"YYYY-YYYY"`
        boxer_career_span: String = String::new(),
        boxer_debut_date: Option<NaiveDate> = None,
        career_start_year: i32 = 0,
        career_end_year: i32 = 0,

        boxer_age: u32 = 0,
        boxer_nation: String = String::new(),
        boxer_stance: String = String::new(),

        boxer_height: String = String::new(),
        boxer_height_ft: Option<f64> = None,
        boxer_height_cm: Option<u32> = None,
        boxer_reach: String = String::new(),
        boxer_reach_ft: Option<f64> = None,
        boxer_reach_cm: Option<u32> = None,

        boxer_residence: String = String::new(),
        boxer_birthplace: String = String::new(),

        boxer_titles_held: Vec<String> = Vec::new(),
    }
}
