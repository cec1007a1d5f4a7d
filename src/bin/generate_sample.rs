use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

const HEADERS: [&str; 10] = [
    "Ano",
    "Mês",
    "Superintendência",
    "Função",
    "Nome - Colaborador",
    "Motivo do Desligamento",
    "Data Abertura da Vaga",
    "Data de Fechamento Vaga em Seleção",
    "Data de Início Substituição",
    "Data Preferencial para Contratação",
];

const DEPARTMENTS: [&str; 6] = [
    "Tecnologia",
    "Financeira",
    "Jurídica",
    "Recursos Humanos",
    "Operações",
    "Comercial",
];

const FUNCTIONS: [&str; 8] = [
    "Analista de Sistemas",
    "Analista Financeiro",
    "Advogado",
    "Assistente Administrativo",
    "Coordenador",
    "Gerente",
    "Engenheiro de Dados",
    "Especialista",
];

const NAMES: [&str; 8] = [
    "Ana", "Bruno", "Carla", "Diego", "Eduarda", "Fábio", "Gabriela", "Heitor",
];

const REASONS: [&str; 4] = [
    "Pedido de demissão",
    "Desligamento",
    "Aposentadoria",
    "Transferência",
];

fn main() -> Result<(), XlsxError> {
    let mut rng = SimpleRng::new(42);

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Contratações")?;
    for (col, h) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *h, &header_format)?;
    }

    let mut row: u32 = 1;
    // 2023 rows are written on purpose: the dashboard drops them.
    for year in [2023u16, 2024, 2025] {
        for month in 1u8..=12 {
            let hires = 2 + rng.below(4);
            for _ in 0..hires {
                let name = rng.pick(&NAMES);
                let (reason, employee) = match rng.below(10) {
                    0 | 1 => ("Aumento de Quadro".to_string(), String::new()),
                    2 => (String::new(), format!("{name} - Promoção")),
                    _ => (rng.pick(&REASONS).to_string(), name.to_string()),
                };

                sheet.write_number(row, 0, year as f64)?;
                sheet.write_number(row, 1, month as f64)?;
                sheet.write_string(row, 2, rng.pick(&DEPARTMENTS))?;
                sheet.write_string(row, 3, rng.pick(&FUNCTIONS))?;
                sheet.write_string(row, 4, &employee)?;
                sheet.write_string(row, 5, &reason)?;

                let day = 1 + rng.below(28) as u8;
                // Opening date as a real date cell, closing date as day-first text.
                let opened = ExcelDateTime::from_ymd(year, month, day)?;
                sheet.write_datetime_with_format(row, 6, &opened, &date_format)?;
                let closing_month = if month < 12 { month + 1 } else { 12 };
                sheet.write_string(row, 7, format!("{day:02}/{closing_month:02}/{year}"))?;
                if rng.below(4) == 0 {
                    sheet.write_string(row, 8, "a definir")?;
                }
                sheet.write_string(row, 9, format!("{year}-{closing_month:02}-{day:02}"))?;

                row += 1;
            }
        }
    }

    let output_path = "corporativo.xlsx";
    workbook.save(output_path)?;
    println!("Wrote {} hiring records to {output_path}", row - 1);
    Ok(())
}
