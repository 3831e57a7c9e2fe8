const FILE_SUFFIX: &str = ".billing-summary.MMdistributors.pdf";

/// Output file name for a customer's bill.
///
/// Path separators in the name are replaced so the file always lands in the output
/// directory.
pub fn bill_file_name(customer_name: &str) -> String {
    let stem: String = customer_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}{FILE_SUFFIX}")
}
