use super::model::HiringType;
use super::normalize::fold_text;

/// Marker for an internal promotion, in folded form.
pub const PROMOTION_MARKER: &str = "PROMOCAO";
/// Marker for a headcount increase, in folded form.
pub const HEADCOUNT_INCREASE_MARKER: &str = "AUMENTO DE QUADRO";

/// Classify a hiring record from its termination reason and employee name.
///
/// Matching is case- and accent-insensitive. A promotion marker in either
/// field wins over a headcount-increase marker; anything else is a
/// replacement.
pub fn classify(termination_reason: &str, employee_name: &str) -> HiringType {
    let reason = fold_text(termination_reason);
    let name = fold_text(employee_name);

    let mentions = |marker: &str| reason.contains(marker) || name.contains(marker);

    if mentions(PROMOTION_MARKER) {
        HiringType::Promotion
    } else if mentions(HEADCOUNT_INCREASE_MARKER) {
        HiringType::NewPosition
    } else {
        HiringType::Replacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_rows() {
        assert_eq!(classify("Aumento de Quadro", "João"), HiringType::NewPosition);
        assert_eq!(classify("", "Maria - Promoção"), HiringType::Promotion);
        assert_eq!(classify("Desligamento", "Carlos"), HiringType::Replacement);
    }

    #[test]
    fn promotion_wins_over_headcount_increase() {
        assert_eq!(
            classify("AUMENTO DE QUADRO", "Ana - promocao"),
            HiringType::Promotion
        );
        assert_eq!(
            classify("Promoção interna / aumento de quadro", ""),
            HiringType::Promotion
        );
    }

    #[test]
    fn markers_match_in_either_field() {
        assert_eq!(classify("", "aumento de quadro"), HiringType::NewPosition);
        assert_eq!(classify("PROMOÇÃO", ""), HiringType::Promotion);
        assert_eq!(classify("promocao", ""), HiringType::Promotion);
    }

    #[test]
    fn empty_fields_are_replacements() {
        assert_eq!(classify("", ""), HiringType::Replacement);
    }

    #[test]
    fn classification_is_deterministic() {
        let inputs = [
            ("Pedido de demissão", "Paulo"),
            ("Aumento de quadro", ""),
            ("", "Lia (Promoção)"),
        ];
        for (reason, name) in inputs {
            assert_eq!(classify(reason, name), classify(reason, name));
        }
    }
}
