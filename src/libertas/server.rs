use crate::SigmaServer;

/// Libertas server: a delegation shell around an inner SSE server.
///
/// The inner scheme's delete protocol is never invoked. A Libertas
/// delete token is an inner-scheme *add* token carrying an encrypted
/// delete record, so [`LibertasServer::delete`] appends to the index
/// exactly like [`LibertasServer::add`]; record removal happens logically
/// on the client during search reconciliation.
pub struct LibertasServer<S> {
    pub sigma: S,
}

impl<S: SigmaServer> LibertasServer<S> {
    pub fn new(sigma: S) -> Self {
        LibertasServer { sigma }
    }

    pub fn build_index(&mut self) {
        self.sigma.build_index();
    }

    /// Appends an encrypted add record to the index.
    pub fn add(&mut self, token: S::AddToken) {
        self.sigma.add(token);
    }

    /// Appends an encrypted delete record to the index. Nothing is
    /// removed here.
    pub fn delete(&mut self, token: S::AddToken) {
        self.sigma.add(token);
    }

    /// Returns the encrypted update records matching the token, to be
    /// reconciled client-side.
    pub fn search(&self, token: &S::SrchToken) -> Vec<S::Ind> {
        self.sigma.search(token)
    }
}
