pub mod class_table;
pub mod label;

use crate::classifier::interface::ClassIndex;
use crate::error::PipelineError;
use class_table::ClassTable;
use label::Label;

/// Maps a model's class index onto the label bound at that position.
pub fn decode(index: ClassIndex, table: &ClassTable) -> Result<Label, PipelineError> {
    table
        .labels()
        .get(index.0)
        .copied()
        .ok_or(PipelineError::OutOfRange {
            index: index.0,
            len: table.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_decode_first_letter() {
        let table = ClassTable::letters();
        assert_eq!(decode(ClassIndex(0), &table), Ok(Label::Letter('A')));
        assert_eq!(decode(ClassIndex(0), &table).unwrap().to_string(), "A");
    }

    #[test]
    fn test_decode_control_token() {
        let table = ClassTable::letters_with_controls();
        assert_eq!(decode(ClassIndex(28), &table), Ok(Label::Space));
        assert_eq!(decode(ClassIndex(28), &table).unwrap().to_string(), "space");
        assert_eq!(decode(ClassIndex(26), &table), Ok(Label::Delete));
        assert_eq!(decode(ClassIndex(27), &table), Ok(Label::Nothing));
    }

    #[test]
    fn test_decode_out_of_range() {
        for table in [ClassTable::letters(), ClassTable::letters_with_controls()] {
            assert_eq!(
                decode(ClassIndex(29), &table),
                Err(PipelineError::OutOfRange {
                    index: 29,
                    len: table.len()
                })
            );
        }
        assert!(decode(ClassIndex(26), &ClassTable::letters()).is_err());
    }

    #[test]
    fn test_decode_is_injective_over_domain() {
        for table in [ClassTable::letters(), ClassTable::letters_with_controls()] {
            let decoded: HashSet<Label> = (0..table.len())
                .map(|i| decode(ClassIndex(i), &table).unwrap())
                .collect();
            assert_eq!(decoded.len(), table.len());
        }
    }
}
