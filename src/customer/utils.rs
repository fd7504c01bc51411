use anyhow::bail;

use super::requests::CustomerForm;

/// Every text field and a division must be filled in. Returns the division id.
pub fn check_form(form: &CustomerForm) -> anyhow::Result<u64> {
    let texts = [
        &form.customer_name,
        &form.address,
        &form.postal_code,
        &form.phone,
    ];
    match form.division_id {
        Some(division_id) if texts.iter().all(|s| !s.trim().is_empty()) => Ok(division_id),
        _ => bail!("Please fill out all fields."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CustomerForm {
        CustomerForm {
            login_token: "token".to_string(),
            customer_name: "Lady McAnderson".to_string(),
            address: "2 Wonder Way".to_string(),
            postal_code: "AF19B".to_string(),
            phone: "01-555-1234".to_string(),
            division_id: Some(101),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert_eq!(check_form(&form()).unwrap(), 101);
    }

    #[test]
    fn missing_division_or_blank_text_fails() {
        let mut no_division = form();
        no_division.division_id = None;
        assert_eq!(
            check_form(&no_division).unwrap_err().to_string(),
            "Please fill out all fields."
        );

        let mut blank_phone = form();
        blank_phone.phone = " ".to_string();
        assert!(check_form(&blank_phone).is_err());
    }
}
