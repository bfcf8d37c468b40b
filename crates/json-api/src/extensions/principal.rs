//! The authenticated principal carried through the depot.

use salvo::prelude::Depot;

use frameshop_app::domain::principals::records::Principal;

pub(crate) trait PrincipalDepotExt {
    fn insert_principal(&mut self, principal: Principal);

    /// The caller, if the request carried a valid token.
    fn principal(&self) -> Option<Principal>;
}

impl PrincipalDepotExt for Depot {
    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal(&self) -> Option<Principal> {
        self.obtain::<Principal>().ok().copied()
    }
}
