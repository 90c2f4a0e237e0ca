//! Plain-text rendering for the shell.

use campkitchen_kitchen::{NutritionLevel, NutritionStatus};

const TABLE_WIDTH: usize = 80;
const SUMMARY_WIDTH: usize = 60;

/// Centered header between rules, then one numbered line per row.
pub fn numbered_table(header: &str, rows: &[String]) -> String {
    let rule = "=".repeat(TABLE_WIDTH);
    let mut out = format!("{rule}\n{header:^TABLE_WIDTH$}\n{rule}\n");
    if rows.is_empty() {
        out.push_str("(none)\n");
    }
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("{}. {row}\n", i + 1));
    }
    out.push_str(&rule);
    out
}

/// Survival summary. The status label is colored when `ansi` is set.
pub fn nutrition_summary(status: &NutritionStatus, ansi: bool) -> String {
    let rule = "=".repeat(SUMMARY_WIDTH);
    let label = if ansi {
        let color = match status.status {
            NutritionLevel::Safe => "\x1b[92m",
            NutritionLevel::Caution => "\x1b[93m",
            NutritionLevel::Critical => "\x1b[91m",
        };
        format!("{color}{}\x1b[0m", status.status)
    } else {
        status.status.to_string()
    };

    format!(
        "{rule}\n{title:^SUMMARY_WIDTH$}\n{rule}\n\
         Total dependents   : {} people\n\
         Available portions : {} portions\n\
         Daily need         : {} portions\n\
         Survival estimate  : {} days\n\
         Status             : {label}\n\
         {rule}",
        status.total_dependents,
        status.available_portions,
        status.daily_need,
        status.survival_days,
        title = "NUTRITION STATUS",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use campkitchen_kitchen::KitchenConfig;

    #[test]
    fn table_numbers_rows_from_one() {
        let out = numbered_table("STOCK", &["Rice".to_string(), "Chicken".to_string()]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1].trim(), "STOCK");
        assert_eq!(lines[3], "1. Rice");
        assert_eq!(lines[4], "2. Chicken");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn empty_table_says_so() {
        assert!(numbered_table("LOW STOCK", &[]).contains("(none)"));
    }

    #[test]
    fn summary_lists_projection() {
        let status = NutritionStatus::project(4, 400, &KitchenConfig::default());
        let plain = nutrition_summary(&status, false);
        assert!(plain.contains("Daily need         : 12 portions"));
        assert!(plain.contains("Survival estimate  : 33 days"));
        assert!(plain.contains("Status             : SAFE\n"));

        let colored = nutrition_summary(&status, true);
        assert!(colored.contains("\x1b[92mSAFE\x1b[0m"));
    }
}
