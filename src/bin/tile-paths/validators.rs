use std::str::FromStr;

pub fn is_numeric<T: FromStr>(v: String) -> Result<(), String> {
    v.parse::<T>()
        .map(|_| ())
        .map_err(|_| format!("must be numeric, got `{}`", v))
}

pub fn is_numeric_min(min: u32) -> impl Fn(String) -> Result<(), String> {
    move |v: String| {
        let val = v
            .parse::<u32>()
            .map_err(|_| format!("must be numeric, got `{}`", v))?;

        if val < min {
            return Err(format!("must be >= {}", min));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates() {
        assert!(is_numeric::<f64>("-12.5".to_owned()).is_ok());
        assert!(is_numeric::<f64>("200".to_owned()).is_ok());
        assert!(is_numeric::<f64>("north".to_owned()).is_err());
    }

    #[test]
    fn zoom_levels() {
        assert!(is_numeric::<u8>("18".to_owned()).is_ok());
        assert!(is_numeric::<u8>("-1".to_owned()).is_err());
        assert!(is_numeric::<u8>("256".to_owned()).is_err());
    }

    #[test]
    fn minimum() {
        let at_least_one = is_numeric_min(1);
        assert!(at_least_one("8".to_owned()).is_ok());
        assert_eq!(at_least_one("0".to_owned()), Err("must be >= 1".to_owned()));
    }
}
