use crate::classifier::interface::{argmax, ClassIndex};

#[test]
fn test_argmax_picks_highest_score() {
    assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(ClassIndex(1)));
    assert_eq!(argmax(&[-3.0, -1.0, -2.0]), Some(ClassIndex(1)));
}

#[test]
fn test_argmax_ties_go_to_lowest_index() {
    assert_eq!(argmax(&[0.2, 0.4, 0.4, 0.1]), Some(ClassIndex(1)));
    assert_eq!(argmax(&[0.5, 0.5, 0.5]), Some(ClassIndex(0)));
}

#[test]
fn test_argmax_ignores_nan() {
    assert_eq!(argmax(&[f32::NAN, 0.3, 0.2]), Some(ClassIndex(1)));
    assert_eq!(argmax(&[0.3, f32::NAN, 0.9]), Some(ClassIndex(2)));
    assert_eq!(argmax(&[f32::NAN]), None);
    assert_eq!(argmax(&[]), None);
}
