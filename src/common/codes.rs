use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};

// ---
// Códigos de rastreio de estoque
// ---
// Toda movimentação ganha um código único no formato {ENT|SAI}-{YYYYMMDD}-{6 chars}.
// ENT = entrada, SAI = saída. Entregas usam sempre o prefixo ENT (código da entrega).

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect()
}

fn code_with_prefix(prefix: &str) -> String {
    format!("{}-{}-{}", prefix, Utc::now().format("%Y%m%d"), random_suffix())
}

/// Código de uma movimentação manual ou sintetizada (entrada/saída).
pub fn movement_code(inbound: bool) -> String {
    code_with_prefix(if inbound { "ENT" } else { "SAI" })
}

/// Código de uma entrega a cliente.
pub fn delivery_code() -> String {
    code_with_prefix("ENT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_code_has_expected_shape() {
        let code = movement_code(false);
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "SAI");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn inbound_and_delivery_codes_use_ent_prefix() {
        assert!(movement_code(true).starts_with("ENT-"));
        assert!(delivery_code().starts_with("ENT-"));
    }
}
