use crate::actions::{Survey, TypeSurvey};

pub fn type_line(ty: &TypeSurvey) -> String {
    let mut line = format!(
        "  - {} ({} questions, {} answers)",
        ty.calculation_type.name, ty.questions, ty.answers
    );
    if !ty.is_consistent() {
        line.push_str(&format!(
            " [declares {}]",
            ty.calculation_type.total_questions_number
        ));
    }
    line
}

pub fn survey_report(survey: &Survey) -> String {
    if survey.types.is_empty() {
        return String::from("Connected to database, but no calculation types found.");
    }
    let mut lines = vec![format!(
        "Found {} calculation types:",
        survey.types.len()
    )];
    lines.extend(survey.types.iter().map(type_line));
    if survey.orphan_questions > 0 || survey.orphan_answers > 0 {
        lines.push(format!(
            "Unresolved rows: {} questions, {} answers",
            survey.orphan_questions, survey.orphan_answers
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalculationType;

    fn surveyed(name: &str, declared: i32, questions: usize, answers: usize) -> TypeSurvey {
        TypeSurvey {
            calculation_type: CalculationType {
                id: 1,
                name: name.to_owned(),
                total_questions_number: declared,
            },
            questions,
            answers,
        }
    }

    #[test]
    fn empty_database() {
        assert_eq!(
            survey_report(&Survey::default()),
            "Connected to database, but no calculation types found."
        );
    }

    #[test]
    fn lists_every_type() {
        let survey = Survey {
            types: vec![
                surveyed("Basic Calculator", 3, 3, 4),
                surveyed("Interest Calculator", 3, 3, 0),
            ],
            ..Survey::default()
        };
        assert_eq!(
            survey_report(&survey),
            "Found 2 calculation types:\n  \
             - Basic Calculator (3 questions, 4 answers)\n  \
             - Interest Calculator (3 questions, 0 answers)"
        );
    }

    #[test]
    fn flags_declared_total_mismatch() {
        let line = type_line(&surveyed("User Engagement", 4, 2, 0));
        assert_eq!(line, "  - User Engagement (2 questions, 0 answers) [declares 4]");
    }

    #[test]
    fn mentions_unresolved_rows() {
        let survey = Survey {
            types: vec![surveyed("Basic Calculator", 3, 3, 4)],
            orphan_questions: 1,
            orphan_answers: 2,
        };
        assert!(survey_report(&survey).ends_with("Unresolved rows: 1 questions, 2 answers"));
    }
}
