use exemplar_file::exemplar_json_schema_pretty;

fn main() {
    let json = exemplar_json_schema_pretty().expect("serialize exemplar json schema");
    println!("{json}");
}
