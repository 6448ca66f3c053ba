//! Display names for raw and expanded columns.

const LABELS: &[(&str, &str)] = &[
    ("Mjob_teacher", "Mother's Job: Teacher"),
    ("Mjob_health", "Mother's Job: Health Care"),
    ("Mjob_services", "Mother's Job: Civil Services"),
    ("Mjob_at_home", "Mother's Job: At Home"),
    ("Mjob_other", "Mother's Job: Other"),
    ("Fjob_teacher", "Father's Job: Teacher"),
    ("Fjob_health", "Father's Job: Health Care"),
    ("Fjob_services", "Father's Job: Civil Services"),
    ("Fjob_at_home", "Father's Job: At Home"),
    ("Fjob_other", "Father's Job: Other"),
    ("reason_home", "Reason: Close to Home"),
    ("reason_reputation", "Reason: School Reputation"),
    ("reason_course", "Reason: Course Preference"),
    ("reason_other", "Reason: Other"),
    ("guardian_mother", "Guardian: Mother"),
    ("guardian_father", "Guardian: Father"),
    ("guardian_other", "Guardian: Other"),
    ("school", "School Choice"),
    ("sex", "Gender"),
    ("age", "Age"),
    ("address", "Urban/Rural Area"),
    ("famsize", "Family Size"),
    ("Pstatus", "Parents Living Apart"),
    ("Medu", "Mother's Education Level"),
    ("Fedu", "Father's Education Level"),
    ("traveltime", "Travel Time to School"),
    ("studytime", "Weekly Study Time"),
    ("failures", "Past Class Failures"),
    ("schoolsup", "Extra School Support"),
    ("famsup", "Family Educational Support"),
    ("paid", "Extra Paid Classes"),
    ("activities", "Extra-curricular Activities"),
    ("nursery", "Attended Nursery School"),
    ("higher", "Wants Higher Education"),
    ("internet", "Internet Access at Home"),
    ("romantic", "In a Relationship"),
    ("famrel", "Quality of Family Relations"),
    ("freetime", "Free Time after School"),
    ("goout", "Going Out with Friends"),
    ("Dalc", "Workday Alcohol Consumption"),
    ("Walc", "Weekend Alcohol Consumption"),
    ("health", "Current Health Status"),
    ("absences", "Number of Absences"),
    ("Mjob", "Mother's Job"),
    ("Fjob", "Father's Job"),
    ("reason", "Reason for School Choice"),
    ("guardian", "Guardian"),
    ("G3", "Final Grade"),
];

fn lookup(name: &str) -> Option<&'static str> {
    LABELS.iter().find(|(key, _)| *key == name).map(|(_, label)| *label)
}

/// Human-readable label of a column. Unlisted indicator columns fall back to
/// `"<attribute label>: <level>"`, anything else to the column name itself.
pub fn feature_label(name: &str) -> String {
    if let Some(label) = lookup(name) {
        return label.to_string();
    }
    name.split_once('_')
        .and_then(|(attribute, level)| lookup(attribute).map(|label| format!("{label}: {level}")))
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_columns_have_fixed_labels() {
        assert_eq!(feature_label("Mjob_teacher"), "Mother's Job: Teacher");
        assert_eq!(feature_label("failures"), "Past Class Failures");
        assert_eq!(feature_label("Fjob_at_home"), "Father's Job: At Home");
    }

    #[test]
    fn unknown_columns_fall_back() {
        assert_eq!(feature_label("guardian_aunt"), "Guardian: aunt");
        assert_eq!(feature_label("shoe_size"), "shoe_size");
        assert_eq!(feature_label("x"), "x");
    }
}
