#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::api::moneydj::extract_nav;

    #[test]
    fn reads_the_value_after_the_nav_label() {
        let html = "<tr><td>基金名稱</td><td>範例基金</td></tr>\
                    <tr><td>淨值</td><td>12.3456</td></tr>";

        assert_eq!(extract_nav(html).unwrap(), dec!(12.3456));
    }

    #[test]
    fn strips_thousands_separators() {
        let html = "<span>最新淨值</span><span>1,234.56</span>";

        assert_eq!(extract_nav(html).unwrap(), dec!(1234.56));
    }

    #[test]
    fn falls_back_to_the_first_decimal_on_unlabeled_pages() {
        let html = "<div>NAV: 98.7100 as of 2024-06-28</div>";

        assert_eq!(extract_nav(html).unwrap(), dec!(98.7100));
    }

    #[test]
    fn rejects_pages_without_a_numeric_value() {
        let html = "<div>維護中</div>";

        assert!(extract_nav(html).is_err());
    }
}
