fn main() {
    println!("cargo:rerun-if-env-changed=WASTESORTER_CONFIG");
    println!("cargo:rerun-if-env-changed=WASTESORTER_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WASTESORTER_WIFI_PASS");

    // ESP-IDF link arguments are only needed for the firmware binary.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
