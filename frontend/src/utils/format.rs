use crate::api::client::encode_segment;

pub fn format_km(mileage: f64) -> String {
    format!("{:.1} km", mileage)
}

pub fn format_percent(level: f64) -> String {
    format!("{:.1}%", level)
}

pub fn format_coords(latitude: f64, longitude: f64, precision: usize) -> String {
    format!(
        "{:.prec$}, {:.prec$}",
        latitude,
        longitude,
        prec = precision
    )
}

pub fn vehicle_href(id: &str) -> String {
    format!("/vehicles/{}", encode_segment(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_use_one_decimal() {
        assert_eq!(format_km(1520.5), "1520.5 km");
        assert_eq!(format_percent(64.0), "64.0%");
    }

    #[test]
    fn coordinates_respect_precision() {
        assert_eq!(format_coords(10.77691234, 106.70091234, 4), "10.7769, 106.7009");
        assert_eq!(format_coords(1.0, -2.0, 6), "1.000000, -2.000000");
    }

    #[test]
    fn vehicle_links_encode_the_id() {
        assert_eq!(vehicle_href("abc-123"), "/vehicles/abc-123");
        assert_eq!(vehicle_href("a/b"), "/vehicles/a%2Fb");
    }
}
