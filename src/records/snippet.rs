// src/records/snippet.rs
use chrono::NaiveDate;

use super::record;

record! {
    /// One bout listed in a boxer's career table.
    ///
    /// `br_boxer_id` points back at the profile the row was listed on.
    pub struct FightSnippet / FightSnippetBuilder {
        fsnip_event_fight_id: String = String::new(),
        fsnip_fight_id: u64 = 0,
        fsnip_fight_date: Option<NaiveDate> = None,
        br_boxer_id: u64 = 0,
        boxer_name: String = String::new(),
        fsnip_boxer_weighin_weight: f64 = 0.0,
        fsnip_fight_result: String = String::new(),
        fsnip_fight_result_type: String = String::new(),
        fsnip_br_opp_id: u64 = 0,
        fsnip_opp_name: String = String::new(),
        fsnip_opp_weighin_weight: f64 = 0.0,
        fsnip_fight_rounds_completed: u32 = 0,
        fsnip_fight_rounds_scheduled: u32 = 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_defaults_for_unset_fields() {
        let mut builder = FightSnippetBuilder::new();
        builder
            .fsnip_event_fight_id("823414/2822374")
            .fsnip_fight_id(2822374u64)
            .fsnip_fight_result("W");
        let snip = builder.build();

        assert_eq!(snip.fsnip_event_fight_id, "823414/2822374");
        assert_eq!(snip.fsnip_fight_id, 2822374);
        assert_eq!(snip.fsnip_fight_result, "W");
        assert_eq!(snip.fsnip_fight_date, None);
        assert_eq!(snip.fsnip_opp_weighin_weight, 0.0);
        assert_eq!(snip.fsnip_fight_rounds_scheduled, 0);
    }
}
