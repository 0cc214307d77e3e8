use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{PHONE_LEN, ZIP_LEN};
use crate::error::{ValidationErrors, ValidationKind};

/// Region names accepted in the `state` field.
pub const REGIONS: [&str; 36] = [
    "Andaman and Nicobar Islands",
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chandigarh",
    "Chhattisgarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jammu and Kashmir",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Ladakh",
    "Lakshadweep",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Puducherry",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

/// One entry of [`REGIONS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region(&'static str);

impl Region {
    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Region> {
        let s = s.trim();
        REGIONS
            .iter()
            .copied()
            .find(|r| r.eq_ignore_ascii_case(s))
            .map(Region)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Region::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown region: {s}")))
    }
}

/// Raw address form input, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressDraft {
    pub name: String,
    pub house_number: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub tracking_id: String,
}

/// A validated shipping address. Only [`AddressDraft::validate`] builds one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    name: String,
    house_number: String,
    address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_line2: Option<String>,
    city: String,
    state: Region,
    zip_code: String,
    phone: String,
    tracking_id: String,
}

impl AddressDraft {
    /// Check every field and report all failures together.
    pub fn validate(&self) -> Result<AddressRecord, ValidationErrors> {
        let mut errs = ValidationErrors::default();
        let name = required(&mut errs, "name", &self.name);
        let house_number = required(&mut errs, "houseNumber", &self.house_number);
        let address_line1 = required(&mut errs, "addressLine1", &self.address_line1);
        let city = required(&mut errs, "city", &self.city);
        let state = match required(&mut errs, "state", &self.state) {
            s if s.is_empty() => None,
            s => {
                let r = Region::parse(&s);
                if r.is_none() {
                    errs.push("state", ValidationKind::UnknownOption);
                }
                r
            }
        };
        let zip_code = fixed_digits(&mut errs, "zipCode", &self.zip_code, ZIP_LEN);
        let phone = fixed_digits(&mut errs, "phone", &self.phone, PHONE_LEN);
        let tracking_id = required(&mut errs, "trackingId", &self.tracking_id);
        let line2 = self.address_line2.trim();
        let address_line2 = (!line2.is_empty()).then(|| line2.to_string());

        match state {
            Some(state) if errs.is_empty() => Ok(AddressRecord {
                name,
                house_number,
                address_line1,
                address_line2,
                city,
                state,
                zip_code,
                phone,
                tracking_id,
            }),
            _ => Err(errs),
        }
    }
}

pub(crate) fn required(errs: &mut ValidationErrors, field: &'static str, v: &str) -> String {
    let v = v.trim();
    if v.is_empty() {
        errs.push(field, ValidationKind::Required);
    }
    v.to_string()
}

fn fixed_digits(errs: &mut ValidationErrors, field: &'static str, v: &str, len: usize) -> String {
    let v = v.trim();
    if v.is_empty() {
        errs.push(field, ValidationKind::Required);
    } else if v.chars().count() != len {
        errs.push(field, ValidationKind::Length { expected: len });
    } else if !v.chars().all(|c| c.is_ascii_digit()) {
        errs.push(field, ValidationKind::NotDigits);
    }
    v.to_string()
}

impl AddressRecord {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn house_number(&self) -> &str {
        &self.house_number
    }
    pub fn address_line1(&self) -> &str {
        &self.address_line1
    }
    pub fn address_line2(&self) -> Option<&str> {
        self.address_line2.as_deref()
    }
    pub fn city(&self) -> &str {
        &self.city
    }
    pub fn state(&self) -> Region {
        self.state
    }
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }
    pub fn phone(&self) -> &str {
        &self.phone
    }
    pub fn tracking_id(&self) -> &str {
        &self.tracking_id
    }

    /// Printed label lines below the "Ship To" header.
    pub fn label_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.name.clone(),
            format!("{}, {}", self.house_number, self.address_line1),
        ];
        if let Some(l2) = &self.address_line2 {
            lines.push(l2.clone());
        }
        lines.push(format!("{}, {} - {}", self.city, self.state, self.zip_code));
        lines.push(format!("Phone : {}", self.phone));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AddressDraft {
        AddressDraft {
            name: "A".into(),
            house_number: "1".into(),
            address_line1: "Main St".into(),
            city: "X".into(),
            state: "Gujarat".into(),
            zip_code: "123456".into(),
            phone: "1234567890".into(),
            tracking_id: "T1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_complete_draft() {
        let rec = draft().validate().unwrap();
        assert_eq!(rec.state().as_str(), "Gujarat");
        assert_eq!(rec.address_line2(), None);
        assert_eq!(rec.tracking_id(), "T1");
    }

    #[test]
    fn zip_must_be_six_digits() {
        for (zip, ok) in [("12345", false), ("1234567", false), ("123456", true)] {
            let mut d = draft();
            d.zip_code = zip.into();
            let res = d.validate();
            assert_eq!(res.is_ok(), ok, "zip {zip}");
            if let Err(errs) = res {
                assert_eq!(
                    errs.get("zipCode").map(|e| e.kind),
                    Some(ValidationKind::Length { expected: 6 })
                );
            }
        }
    }

    #[test]
    fn phone_must_be_ten_digits() {
        for (phone, ok) in [("123456789", false), ("12345678901", false), ("1234567890", true)] {
            let mut d = draft();
            d.phone = phone.into();
            assert_eq!(d.validate().is_ok(), ok, "phone {phone}");
        }
    }

    #[test]
    fn non_digit_zip_is_rejected() {
        let mut d = draft();
        d.zip_code = "12a456".into();
        let errs = d.validate().unwrap_err();
        assert_eq!(errs.get("zipCode").map(|e| e.kind), Some(ValidationKind::NotDigits));
    }

    #[test]
    fn reports_every_missing_field() {
        let errs = AddressDraft::default().validate().unwrap_err();
        for f in [
            "name",
            "houseNumber",
            "addressLine1",
            "city",
            "state",
            "zipCode",
            "phone",
            "trackingId",
        ] {
            assert_eq!(errs.get(f).map(|e| e.kind), Some(ValidationKind::Required), "{f}");
        }
        assert!(errs.get("addressLine2").is_none());
    }

    #[test]
    fn unknown_region_is_rejected() {
        let mut d = draft();
        d.state = "Atlantis".into();
        let errs = d.validate().unwrap_err();
        assert_eq!(errs.get("state").map(|e| e.kind), Some(ValidationKind::UnknownOption));
    }

    #[test]
    fn region_lookup_ignores_case() {
        assert_eq!(Region::parse(" west bengal "), Region::parse("West Bengal"));
        assert!(Region::parse("West Bengal").is_some());
    }

    #[test]
    fn label_lines_include_optional_second_line() {
        let mut d = draft();
        d.address_line2 = "Near Park".into();
        let rec = d.validate().unwrap();
        assert_eq!(
            rec.label_lines(),
            vec![
                "A".to_string(),
                "1, Main St".to_string(),
                "Near Park".to_string(),
                "X, Gujarat - 123456".to_string(),
                "Phone : 1234567890".to_string(),
            ]
        );
    }
}
