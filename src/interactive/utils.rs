use std::fmt;
use std::str::FromStr;

pub fn prompt_text_handle_errors<T>(prompt: &str) -> eyre::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    loop {
        let t = inquire::Text::new(prompt).prompt()?;

        match t.trim().parse() {
            Ok(t) => return Ok(t),
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        }
    }
}
