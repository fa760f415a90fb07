/// Defines the contract for resolving device manufacturers from hardware addresses.
pub trait VendorRepository: Send + Sync {
    /// Retrieves the vendor name for a given hardware address.
    ///
    /// # Arguments
    /// * `mac` - The address as reported by a probe. It may be malformed or empty.
    ///
    /// # Returns
    /// * `Some(String)` - The name of the vendor if found.
    /// * `None` - If the prefix is unknown to this repository.
    fn get_vendor(&self, mac: &str) -> Option<String>;
}
