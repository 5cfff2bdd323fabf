use std::{fmt, fs, io::Write, path::Path};

#[derive(Debug, Clone)]
pub struct FileError
{
    pub why: String
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.why)
    }
}

pub fn write_file_bytes(path: &str, data: &[u8]) -> Result<(), FileError>
{
    let mut file = match fs::File::create(path)
    {
        Ok(f) => f,
        Err(why) => return Err(FileError { why: format!("could not create {}, {}", path, why) })
    };

    match file.write_all(data)
    {
        Ok(_) => Ok(()),
        Err(why) => Err(FileError { why: format!("could not write {}, {}", path, why) })
    }
}

pub fn read_file_utf8(path: &str) -> Result<String, FileError>
{
    fs::read_to_string(path).map_err(|why| FileError { why: format!("could not read {} as utf8, {}", path, why) })
}

pub fn file_exists(path: &str) -> bool
{
    Path::new(path).is_file()
}
