use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("geolens")
        .version(env!("CARGO_PKG_VERSION"))
        .author("GeoLens Contributors")
        .about("Audit web pages for SEO and generative-engine visibility")
        .arg(clap::arg!(<INPUT> "URL to audit, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--pretty "Pretty-print JSON output"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds for the page fetch").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for the page fetch").value_name("UA"))
        .arg(
            clap::arg!(--url <URL> "Page URL to attribute to file or stdin input")
                .value_name("URL")
                .default_value("https://localhost/"),
        )
        .arg(clap::arg!(--probe_origin "Probe the page's own origin instead of https://<domain>"))
        .arg(
            clap::arg!(-n --max_recommendations <NUM> "Maximum number of recommendations (at most 10)")
                .default_value("10"),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "geolens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "geolens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "geolens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "geolens", &completions_dir).unwrap();

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
