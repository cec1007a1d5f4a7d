//! Normalized column names and the fixed sets the pipeline works with.

pub const YEAR: &str = "ANO";
pub const MONTH: &str = "MES";
pub const DEPARTMENT: &str = "SUPERINTENDENCIA";
pub const FUNCTION: &str = "FUNCAO";
pub const EMPLOYEE: &str = "NOME - COLABORADOR";
pub const TERMINATION_REASON: &str = "MOTIVO DO DESLIGAMENTO";

/// Derived column holding the [`HiringType`](super::model::HiringType) label.
pub const HIRING_TYPE: &str = "TIPO DE CONTRATACAO";

pub const DATE_COLUMNS: [&str; 4] = [
    "DATA ABERTURA DA VAGA",
    "DATA DE FECHAMENTO VAGA EM SELECAO",
    "DATA DE INICIO SUBSTITUICAO",
    "DATA PREFERENCIAL PARA CONTRATACAO",
];

pub const REQUIRED_COLUMNS: [&str; 5] = [YEAR, MONTH, FUNCTION, DEPARTMENT, HIRING_TYPE];

/// The report only covers these years.
pub const ALLOWED_YEARS: [i32; 2] = [2024, 2025];
