use mf1_i18n_core::{PluralCategory, PluralKey, PluralRule};

use crate::error::{CompileError, CompileResult};
use crate::parser::PluralStatement;

/// Checks category keys against the rule's declared set for the statement's
/// kind. Rules that declare nothing accept every key.
pub fn validate_plural_keys(statement: &PluralStatement, rule: &PluralRule) -> CompileResult<()> {
    let declared = rule.categories(statement.kind);
    if declared.is_empty() {
        return Ok(());
    }
    for case in &statement.cases {
        let PluralKey::Label(label) = &case.key else {
            continue;
        };
        let known = PluralCategory::from_label(label)
            .is_some_and(|category| category == PluralCategory::Other || declared.contains(&category));
        if !known {
            return Err(CompileError::InvalidPluralKey {
                key: label.clone(),
                arg: statement.arg.clone(),
                locale: rule.locale().to_string(),
                valid: declared
                    .iter()
                    .map(|category| category.as_str().to_string())
                    .collect(),
            });
        }
    }
    Ok(())
}
