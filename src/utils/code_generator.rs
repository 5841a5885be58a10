use rand::Rng;

/// Generates a 6-digit OTP code. Leading zeros are preserved, so the
/// whole "000000"-"999999" range is reachable.
pub fn generate_otp_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..=999999))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_is_six_ascii_digits() {
        for _ in 0..100 {
            let code = generate_otp_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_leading_zero_codes_occur() {
        // P(no code below 100000 in 200 draws) = 0.9^200 ≈ 7e-10.
        let saw_low = (0..200)
            .map(|_| generate_otp_code())
            .any(|code| code.parse::<u32>().unwrap() < 100_000);
        assert!(saw_low, "no leading-zero code in 200 draws");
    }

    #[test]
    fn test_codes_vary() {
        let codes: HashSet<String> = (0..50).map(|_| generate_otp_code()).collect();
        assert!(codes.len() > 1);
    }
}
