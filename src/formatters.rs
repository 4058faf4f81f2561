//! String formatting helpers: Brazilian currency rendering and the cosmetic
//! CNPJ/CPF masks. All functions are pure and total over arbitrary input;
//! they never validate, only reformat.

/// Formata um valor como moeda brasileira: `R$ 1.234,56`.
pub fn format_currency(amount: f64) -> String {
    let formatted = format_number_with_separators(amount.abs(), 2);
    if amount < 0.0 {
        format!("-R$ {}", formatted)
    } else {
        format!("R$ {}", formatted)
    }
}

/// Agrupamento de milhares com ponto e decimais com vírgula.
fn format_number_with_separators(num: f64, decimals: usize) -> String {
    let formatted = format!("{:.decimals$}", num, decimals = decimals);
    let mut parts = formatted.split('.');
    let integer = parts.next().unwrap_or("0");
    let decimal = parts.next().unwrap_or("00");

    let mut result = String::new();
    let mut count = 0;

    for c in integer.chars().rev() {
        if count == 3 {
            result.push('.');
            count = 0;
        }
        result.push(c);
        count += 1;
    }

    let integer_formatted: String = result.chars().rev().collect();

    if decimals > 0 {
        format!("{},{}", integer_formatted, decimal)
    } else {
        integer_formatted
    }
}

/// Máscara progressiva de CNPJ: `XX.XXX.XXX/XXXX-XX`.
///
/// Entradas parciais recebem apenas os separadores alcançáveis no seu
/// comprimento (uso típico: reformatar a cada tecla digitada). Dígitos além
/// de 14 são descartados.
pub fn mask_cnpj(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0..=2 => digits,
        3..=5 => format!("{}.{}", &digits[..2], &digits[2..]),
        6..=8 => format!("{}.{}.{}", &digits[..2], &digits[2..5], &digits[5..]),
        9..=12 => format!(
            "{}.{}.{}/{}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..]
        ),
        _ => format!(
            "{}.{}.{}/{}-{}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..14.min(digits.len())]
        ),
    }
}

/// Máscara progressiva de CPF: `XXX.XXX.XXX-XX`. Mesmo contrato parcial da
/// máscara de CNPJ; dígitos além de 11 são descartados.
pub fn mask_cpf(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11.min(digits.len())]
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(98765.43), "R$ 98.765,43");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
    }

    #[test]
    fn test_format_currency_zero_and_small() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(9.9), "R$ 9,90");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-1234.56), "-R$ 1.234,56");
    }

    #[test]
    fn test_mask_cnpj_full() {
        assert_eq!(mask_cnpj("12345678901234"), "12.345.678/9012-34");
    }

    #[test]
    fn test_mask_cnpj_partial() {
        assert_eq!(mask_cnpj(""), "");
        assert_eq!(mask_cnpj("12"), "12");
        assert_eq!(mask_cnpj("123"), "12.3");
        assert_eq!(mask_cnpj("123456"), "12.345.6");
        assert_eq!(mask_cnpj("123456789"), "12.345.678/9");
    }

    #[test]
    fn test_mask_cnpj_strips_and_truncates() {
        assert_eq!(mask_cnpj("12.345.678/9012-34"), "12.345.678/9012-34");
        assert_eq!(mask_cnpj("12345678901234999"), "12.345.678/9012-34");
        assert_eq!(mask_cnpj("abc12x3"), "12.3");
    }

    #[test]
    fn test_mask_cnpj_idempotent_on_digit_projection() {
        let once = mask_cnpj("12345678901234");
        let twice = mask_cnpj(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_cpf_full() {
        assert_eq!(mask_cpf("12345678901"), "123.456.789-01");
    }

    #[test]
    fn test_mask_cpf_partial() {
        assert_eq!(mask_cpf("123"), "123");
        assert_eq!(mask_cpf("1234"), "123.4");
        assert_eq!(mask_cpf("1234567"), "123.456.7");
        assert_eq!(mask_cpf("1234567890"), "123.456.789-0");
    }

    #[test]
    fn test_mask_cpf_truncates_extra_digits() {
        assert_eq!(mask_cpf("119876543210000"), "119.876.543-21");
    }
}
