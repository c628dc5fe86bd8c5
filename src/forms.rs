/// Creation dialog state: the draft being edited and whether it is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form<D> {
    draft: D,
    open: bool,
}

impl<D: Default> Form<D> {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the form. The draft is kept, as cancelling a dialog does.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Run `f` on the draft. On success the draft is cleared and the form
    /// closed; on failure both are left as they were.
    pub fn submit<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&D) -> Result<T, E>,
    {
        let result = f(&self.draft)?;
        self.draft = D::default();
        self.open = false;
        Ok(result)
    }
}
