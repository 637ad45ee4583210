use crate::config::FieldTypeConfig;
use crate::{Error, Result};
use solrtype_core::{available_custom_codes, available_domains, SolrFieldType};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

/// Field type configurations loaded from a directory of `*.json` files
#[derive(Debug, Default)]
pub struct FieldTypeStore {
    field_types: Vec<SolrFieldType>,
    index: HashMap<String, usize>,
}

impl FieldTypeStore {
    /// Load every `*.json` file in `dir`, in file name order.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut field_types = Vec::with_capacity(paths.len());
        for path in &paths {
            trace!("Loading field type config {:?}", path);
            field_types.push(Self::load_file(path)?);
        }

        let store = Self::from_field_types(field_types)?;
        debug!("Loaded {} field types from {:?}", store.len(), dir);
        Ok(store)
    }

    /// Load a single config file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<SolrFieldType> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: FieldTypeConfig = serde_json::from_str(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.into_field_type()?)
    }

    pub fn from_field_types<I>(field_types: I) -> Result<Self>
    where
        I: IntoIterator<Item = SolrFieldType>,
    {
        let mut store = Self::default();
        for field_type in field_types {
            store.insert(field_type)?;
        }
        Ok(store)
    }

    pub fn insert(&mut self, field_type: SolrFieldType) -> Result<()> {
        if self.index.contains_key(field_type.id()) {
            return Err(Error::DuplicateId(field_type.id().to_string()));
        }
        self.index.insert(field_type.id().to_string(), self.field_types.len());
        self.field_types.push(field_type);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.field_types.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_types.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SolrFieldType> {
        self.index.get(id).map(|&i| &self.field_types[i])
    }

    pub fn require(&self, id: &str) -> Result<&SolrFieldType> {
        self.get(id).ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SolrFieldType> {
        self.field_types.iter()
    }

    /// Field types targeting `language_code`
    pub fn for_language<'a>(&'a self, language_code: &'a str) -> impl Iterator<Item = &'a SolrFieldType> + 'a {
        self.iter().filter(move |f| f.language_code() == language_code)
    }

    pub fn available_domains(&self) -> Vec<String> {
        available_domains(self.iter())
    }

    pub fn available_custom_codes(&self) -> Vec<String> {
        available_custom_codes(self.iter())
    }

    /// Write the text files of a field type into `out_dir`, each through a
    /// uniquely named temporary file that is renamed into place.
    ///
    /// Names must be plain file names; nothing is written if any of them
    /// would resolve outside `out_dir`.
    pub fn write_text_files<P: AsRef<Path>>(field_type: &SolrFieldType, out_dir: P) -> Result<Vec<PathBuf>> {
        let out_dir = out_dir.as_ref();
        for name in field_type.text_files().keys() {
            check_file_name(name)?;
        }
        fs::create_dir_all(out_dir)?;

        let mut written = Vec::with_capacity(field_type.text_files().len());
        for (name, content) in field_type.text_files() {
            let target = out_dir.join(name);
            let mut temp_file = NamedTempFile::new_in(out_dir)?;
            temp_file.write_all(content.as_bytes())?;
            temp_file.persist(&target).map_err(|e| e.error)?;
            trace!("Wrote {:?}", target);
            written.push(target);
        }
        Ok(written)
    }
}

fn check_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::InvalidFileName(name.to_string())),
    }
}

impl<'a> IntoIterator for &'a FieldTypeStore {
    type Item = &'a SolrFieldType;
    type IntoIter = std::slice::Iter<'a, SolrFieldType>;

    fn into_iter(self) -> Self::IntoIter {
        self.field_types.iter()
    }
}
