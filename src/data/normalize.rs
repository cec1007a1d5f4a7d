use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// Fold text to uppercase ASCII: NFKD-decompose, drop everything that is not
/// ASCII (combining accents included), uppercase.
///
/// `"Promoção"` → `"PROMOCAO"`, `"Superintendência"` → `"SUPERINTENDENCIA"`.
pub fn fold_text(s: &str) -> String {
    s.nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Normalize one column name: trim, fold, trim again.
///
/// The output is trimmed uppercase ASCII, so applying it twice is the same
/// as applying it once.
pub fn normalize_column_name(name: &str) -> String {
    fold_text(name.trim()).trim().to_string()
}

/// Normalize every header in place.
///
/// Blank names become `UNNAMED: <index>`. Names that collide after folding
/// (`"Mês"` and `"MES"`) get a `.1`, `.2`, … suffix on the later ones.
pub fn normalize_columns(headers: &mut [String]) {
    let mut taken: HashSet<String> = HashSet::new();
    for (i, header) in headers.iter_mut().enumerate() {
        let mut name = normalize_column_name(header);
        if name.is_empty() {
            name = format!("UNNAMED: {i}");
        }
        if taken.contains(&name) {
            let base = name;
            let mut k = 1;
            name = format!("{base}.{k}");
            while taken.contains(&name) {
                k += 1;
                name = format!("{base}.{k}");
            }
            log::debug!("duplicate column '{base}' renamed to '{name}'");
        }
        taken.insert(name.clone());
        *header = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn folds_accents_and_case() {
        assert_eq!(normalize_column_name("  Superintendência "), "SUPERINTENDENCIA");
        assert_eq!(normalize_column_name("Função"), "FUNCAO");
        assert_eq!(normalize_column_name("Mês"), "MES");
        assert_eq!(
            normalize_column_name("Data de Fechamento Vaga em Seleção"),
            "DATA DE FECHAMENTO VAGA EM SELECAO"
        );
        assert_eq!(normalize_column_name("Nome - Colaborador"), "NOME - COLABORADOR");
    }

    #[test]
    fn drops_symbols_without_ascii_form() {
        assert_eq!(normalize_column_name("📊 Ano"), "ANO");
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let mut once = owned(&[
            " Ano",
            "Mês ",
            "Superintendência",
            "Função",
            "Tipo de Contratação",
            "",
            "Mes",
            "ⁱndice",
        ]);
        normalize_columns(&mut once);
        let mut twice = once.clone();
        normalize_columns(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn blank_and_duplicate_headers_get_unique_names() {
        let mut headers = owned(&["Mês", "", "MES", "mes"]);
        normalize_columns(&mut headers);
        assert_eq!(headers, owned(&["MES", "UNNAMED: 1", "MES.1", "MES.2"]));
    }

    #[test]
    fn suffix_skips_names_already_in_use() {
        let mut headers = owned(&["MES", "MES.1", "Mês"]);
        normalize_columns(&mut headers);
        assert_eq!(headers, owned(&["MES", "MES.1", "MES.2"]));
    }

    #[test]
    fn fold_text_handles_free_text() {
        assert_eq!(fold_text("Maria - Promoção"), "MARIA - PROMOCAO");
        assert_eq!(fold_text("aumento de quadro"), "AUMENTO DE QUADRO");
    }
}
