use tagtree::{parse, SerializeOptions};

fn main() {
    let xml_data = r#"<?xml version="1.0"?>
<user id="7">
  <name>John Doe</name>
  <email>john.doe@example.com</email>
  <role>admin</role>
  <role>editor</role>
</user>"#;

    match parse(xml_data.as_bytes()) {
        Ok(document) => {
            let json_output = document.to_json().unwrap();
            println!("Successfully parsed XML to JSON:\n{json_output}");

            let options = SerializeOptions {
                timestamp_comment: true,
                ..SerializeOptions::default()
            };
            let xml_output = document.to_xml(&options).unwrap();
            println!("And back again:\n{}", String::from_utf8_lossy(&xml_output));
        }
        Err(e) => {
            eprintln!("Failed to parse XML: {:?}", miette::Report::new(e));
        }
    }
}
