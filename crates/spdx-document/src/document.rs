//! The document that owns extracted licenses and mints identifiers.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use spdx_expression::{
    AnyLicenseInfo, ExtractedLicenseError, ExtractedLicenseInfo, ExtractedLicenseScope,
    LICENSE_REF_PREFIX, LicenseParseError, LicenseRegistry, ReferenceIdAllocator, SimpleLicense,
    is_valid_license_ref, parse,
};

use crate::errors::DocumentError;
use crate::namespace::DocumentNamespace;
use crate::store::{DocumentStore, MemoryStore, PropertyValue};

/// Prefix of document element identifiers.
pub const ELEMENT_REF_PREFIX: &str = "SPDXRef";

/// Property naming a subject's type.
pub const TYPE_PROPERTY: &str = "type";
/// Type value marking a subject as an extracted license.
pub const EXTRACTED_LICENSING_INFO: &str = "ExtractedLicensingInfo";
/// Property holding an extracted license id.
pub const LICENSE_ID_PROPERTY: &str = "licenseId";
/// Property holding extracted license text.
pub const EXTRACTED_TEXT_PROPERTY: &str = "extractedText";
/// Property holding a human readable name.
pub const NAME_PROPERTY: &str = "name";
/// Property holding a free-form comment.
pub const COMMENT_PROPERTY: &str = "comment";
/// Property holding reference URLs.
pub const SEE_ALSO_PROPERTY: &str = "seeAlso";

struct DocumentState<S> {
    store: S,
    extracted: BTreeMap<String, ExtractedLicenseInfo>,
}

/// An SPDX document: a namespace, a property store and the extracted
/// licenses it owns.
///
/// Identifier allocation is seeded from every subject in the store when the
/// document is opened, so minted `LicenseRef-N` and `SPDXRef-N` ids never
/// collide with ids the document already holds.
///
/// # Examples
/// ```
/// use spdx_document::{DocumentNamespace, SpdxDocument};
/// let ns = DocumentNamespace::new("https://example.com/spdx/demo")?;
/// let document = SpdxDocument::new(ns);
/// let first = document.create_extracted_license("Permission is granted.");
/// let again = document.create_extracted_license("Permission  is granted.\r\n");
/// assert_eq!(first.id(), "LicenseRef-1");
/// assert_eq!(again.id(), "LicenseRef-1");
/// # Ok::<(), spdx_document::DocumentError>(())
/// ```
pub struct SpdxDocument<S: DocumentStore = MemoryStore> {
    namespace: DocumentNamespace,
    state: Mutex<DocumentState<S>>,
    license_refs: ReferenceIdAllocator,
    element_refs: ReferenceIdAllocator,
}

impl SpdxDocument<MemoryStore> {
    /// An empty in-memory document.
    #[must_use]
    pub fn new(namespace: DocumentNamespace) -> Self {
        Self {
            namespace,
            state: Mutex::new(DocumentState {
                store: MemoryStore::default(),
                extracted: BTreeMap::new(),
            }),
            license_refs: ReferenceIdAllocator::new(LICENSE_REF_PREFIX),
            element_refs: ReferenceIdAllocator::new(ELEMENT_REF_PREFIX),
        }
    }
}

impl<S: DocumentStore> SpdxDocument<S> {
    /// Open a document over an existing store.
    ///
    /// Every subject id seeds the allocators, and every subject typed
    /// `ExtractedLicensingInfo` is loaded into the extracted-license table.
    ///
    /// # Errors
    /// Returns [`DocumentError::PropertyShape`] when an extracted license
    /// stores a list where a single string belongs.
    pub fn open(namespace: DocumentNamespace, store: S) -> Result<Self, DocumentError> {
        let subjects = store.subjects();
        let license_refs = ReferenceIdAllocator::seeded(LICENSE_REF_PREFIX, &subjects);
        let element_refs = ReferenceIdAllocator::seeded(ELEMENT_REF_PREFIX, &subjects);
        let mut extracted = BTreeMap::new();
        for subject in &subjects {
            if store.string_property(subject, TYPE_PROPERTY) != Some(EXTRACTED_LICENSING_INFO) {
                continue;
            }
            extracted.insert(subject.clone(), read_extracted(&store, subject)?);
        }
        log::debug!(
            "opened document {namespace} with {} subjects and {} extracted licenses",
            subjects.len(),
            extracted.len()
        );
        Ok(Self {
            namespace,
            state: Mutex::new(DocumentState { store, extracted }),
            license_refs,
            element_refs,
        })
    }

    /// The document namespace.
    #[must_use]
    pub fn namespace(&self) -> &DocumentNamespace {
        &self.namespace
    }

    /// Run `f` against the backing store.
    pub fn with_store<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.lock().store)
    }

    /// Give up the document and return its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .store
    }

    /// Register an extracted license under its own id.
    ///
    /// Registering an id that is already present succeeds when the texts are
    /// equivalent, and returns the stored license unchanged. A placeholder
    /// created by parsing (no text yet) is replaced.
    ///
    /// # Errors
    /// Returns [`ExtractedLicenseError::InvalidId`] unless the id is a local
    /// `LicenseRef-<idstring>`, and [`ExtractedLicenseError::DuplicateId`]
    /// when the id is taken by materially different text.
    pub fn add_extracted_license(
        &self,
        license: ExtractedLicenseInfo,
    ) -> Result<ExtractedLicenseInfo, ExtractedLicenseError> {
        let id = license.id();
        if id.contains(':') {
            return Err(invalid_id(id, "references another document"));
        }
        if !is_valid_license_ref(id) {
            return Err(invalid_id(id, "expected LicenseRef-<idstring>"));
        }
        let mut state = self.lock();
        self.register(&mut state, license)
    }

    /// Return an extracted license carrying `text`, reusing an equivalent
    /// entry when the document already has one.
    pub fn create_extracted_license(&self, text: &str) -> ExtractedLicenseInfo {
        let mut state = self.lock();
        let candidate = ExtractedLicenseInfo::with_text("", text);
        if let Some(existing) = state
            .extracted
            .values()
            .find(|existing| existing.text().is_some() && existing.equivalent(&candidate))
        {
            return existing.clone();
        }
        let license = ExtractedLicenseInfo::with_text(self.license_refs.allocate(), text);
        log::debug!("minted extracted license {}", license.id());
        write_extracted(&mut state.store, &license);
        state
            .extracted
            .insert(license.id().to_owned(), license.clone());
        license
    }

    /// Every extracted license, ordered by id.
    #[must_use]
    pub fn extracted_licenses(&self) -> Vec<ExtractedLicenseInfo> {
        self.lock().extracted.values().cloned().collect()
    }

    /// The extracted license registered under `id`.
    #[must_use]
    pub fn extracted_license(&self, id: &str) -> Option<ExtractedLicenseInfo> {
        self.lock().extracted.get(id).cloned()
    }

    /// Parse `expression` with this document owning its extracted licenses.
    ///
    /// # Errors
    /// Propagates [`LicenseParseError`] from the parser.
    pub fn parse_license<R>(
        &self,
        expression: &str,
        registry: &R,
    ) -> Result<AnyLicenseInfo, LicenseParseError>
    where
        R: LicenseRegistry + ?Sized,
    {
        parse(expression, registry, self)
    }

    /// Store `value` as the canonical expression string of `property`.
    ///
    /// Extracted licenses in the tree are registered with the document first.
    ///
    /// # Errors
    /// Returns [`DocumentError::Extracted`] when an extracted license in the
    /// tree conflicts with one the document already holds.
    pub fn set_license_property(
        &self,
        subject: &str,
        property: &str,
        value: &AnyLicenseInfo,
    ) -> Result<(), DocumentError> {
        let mut extracted = Vec::new();
        collect_extracted(value, &mut extracted);
        let mut state = self.lock();
        for license in extracted {
            self.register(&mut state, license.clone())?;
        }
        self.element_refs.observe(subject);
        state
            .store
            .set_string_property(subject, property, &value.to_string());
        Ok(())
    }

    /// Read `property` back as a license expression.
    ///
    /// # Errors
    /// Returns [`DocumentError::PropertyShape`] when the property holds a
    /// list and [`DocumentError::Parse`] when the stored string does not
    /// parse.
    pub fn license_property<R>(
        &self,
        subject: &str,
        property: &str,
        registry: &R,
    ) -> Result<Option<AnyLicenseInfo>, DocumentError>
    where
        R: LicenseRegistry + ?Sized,
    {
        let Some(expression) = text_property(&self.lock().store, subject, property)? else {
            return Ok(None);
        };
        Ok(Some(self.parse_license(&expression, registry)?))
    }

    fn register(
        &self,
        state: &mut DocumentState<S>,
        license: ExtractedLicenseInfo,
    ) -> Result<ExtractedLicenseInfo, ExtractedLicenseError> {
        if let Some(existing) = state.extracted.get(license.id()) {
            if license.text().is_none() || existing.equivalent(&license) {
                return Ok(existing.clone());
            }
            if existing.text().is_some() {
                log::warn!("rejecting conflicting text for {}", license.id());
                return Err(ExtractedLicenseError::DuplicateId {
                    id: license.id().to_owned(),
                });
            }
        }
        self.license_refs.observe(license.id());
        write_extracted(&mut state.store, &license);
        state
            .extracted
            .insert(license.id().to_owned(), license.clone());
        Ok(license)
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: DocumentStore> ExtractedLicenseScope for SpdxDocument<S> {
    fn get_or_create_extracted_license(
        &self,
        id: &str,
    ) -> Result<ExtractedLicenseInfo, ExtractedLicenseError> {
        let mut state = self.lock();
        if let Some(existing) = state.extracted.get(id) {
            return Ok(existing.clone());
        }
        self.register(&mut state, ExtractedLicenseInfo::new(id))
    }

    fn next_free_extracted_license_id(&self) -> String {
        self.license_refs.allocate()
    }

    fn next_free_element_id(&self) -> String {
        self.element_refs.allocate()
    }
}

impl<S: DocumentStore> std::fmt::Debug for SpdxDocument<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpdxDocument")
            .field("namespace", &self.namespace)
            .field("extracted", &self.lock().extracted.len())
            .finish_non_exhaustive()
    }
}

fn invalid_id(id: &str, reason: &'static str) -> ExtractedLicenseError {
    ExtractedLicenseError::InvalidId {
        id: id.to_owned(),
        reason,
    }
}

fn collect_extracted<'a>(node: &'a AnyLicenseInfo, out: &mut Vec<&'a ExtractedLicenseInfo>) {
    match node {
        AnyLicenseInfo::Extracted(license) => out.push(license),
        AnyLicenseInfo::Set(set) => {
            for member in set.members() {
                collect_extracted(member, out);
            }
        }
        AnyLicenseInfo::OrLater(op) => collect_simple(op.license(), out),
        AnyLicenseInfo::WithException(op) => collect_simple(op.license().simple_license(), out),
        AnyLicenseInfo::Listed(_) | AnyLicenseInfo::NoAssertion | AnyLicenseInfo::None => {}
    }
}

fn collect_simple<'a>(license: &'a SimpleLicense, out: &mut Vec<&'a ExtractedLicenseInfo>) {
    if let SimpleLicense::Extracted(extracted) = license {
        out.push(extracted);
    }
}

fn text_property<S: DocumentStore + ?Sized>(
    store: &S,
    subject: &str,
    property: &str,
) -> Result<Option<String>, DocumentError> {
    match store.property(subject, property) {
        None => Ok(None),
        Some(PropertyValue::Text(value)) => Ok(Some(value.clone())),
        Some(PropertyValue::List(_)) => Err(DocumentError::PropertyShape {
            subject: subject.to_owned(),
            property: property.to_owned(),
        }),
    }
}

fn read_extracted<S: DocumentStore + ?Sized>(
    store: &S,
    subject: &str,
) -> Result<ExtractedLicenseInfo, DocumentError> {
    let mut license = ExtractedLicenseInfo::new(subject);
    if let Some(text) = text_property(store, subject, EXTRACTED_TEXT_PROPERTY)? {
        license = ExtractedLicenseInfo::with_text(subject, text);
    }
    if let Some(name) = text_property(store, subject, NAME_PROPERTY)? {
        license = license.named(name);
    }
    if let Some(comment) = text_property(store, subject, COMMENT_PROPERTY)? {
        license = license.commented(comment);
    }
    let see_also = store.list_property(subject, SEE_ALSO_PROPERTY);
    if !see_also.is_empty() {
        license = license.with_see_also(see_also);
    }
    Ok(license)
}

fn write_extracted<S: DocumentStore + ?Sized>(store: &mut S, license: &ExtractedLicenseInfo) {
    let id = license.id();
    store.set_string_property(id, TYPE_PROPERTY, EXTRACTED_LICENSING_INFO);
    store.set_string_property(id, LICENSE_ID_PROPERTY, id);
    if let Some(text) = license.text() {
        store.set_string_property(id, EXTRACTED_TEXT_PROPERTY, text);
    }
    if let Some(name) = license.name() {
        store.set_string_property(id, NAME_PROPERTY, name);
    }
    if let Some(comment) = license.comment() {
        store.set_string_property(id, COMMENT_PROPERTY, comment);
    }
    if !license.see_also().is_empty() {
        store.set_list_property(id, SEE_ALSO_PROPERTY, license.see_also().to_vec());
    }
}
