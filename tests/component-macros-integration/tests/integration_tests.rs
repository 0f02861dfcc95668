//! Centralized integration tests for component-macros crate

use di_abstractions::{DiContainer, StereotypeFilter};
use di_impl::{DiContainerImpl, GlobalCatalogDiscovery};
use infrastructure_common::{catalog_components, Stereotype};
use std::sync::Arc;

mod billing {
    pub mod persistence {
        use component_macros::Component;

        pub trait InvoiceStore: Send + Sync {
            fn next_number(&self) -> u64;
        }

        #[derive(Default, Component)]
        #[component(repository)]
        #[provides(dyn InvoiceStore)]
        pub struct SqlInvoiceStore;

        impl InvoiceStore for SqlInvoiceStore {
            fn next_number(&self) -> u64 {
                1001
            }
        }
    }

    pub mod services {
        use super::persistence::InvoiceStore;
        use component_macros::Component;
        use infrastructure_common::Slot;

        #[derive(Default, Component)]
        #[component(service, name = "invoicing")]
        pub struct InvoiceService {
            #[inject]
            pub store: Slot<dyn InvoiceStore>,
            #[inject]
            pub clock: Slot<super::jobs::BillingClock>,
        }
    }

    pub mod jobs {
        use component_macros::Component;

        #[derive(Default, Component)]
        #[component(stereotype = "job")]
        pub struct BillingClock;
    }
}

fn billing_namespace() -> String {
    format!("{}::billing", module_path!())
}

#[test]
fn test_catalog_groups_components_by_module() {
    let all = catalog_components(&billing_namespace());
    assert_eq!(all.len(), 3);

    let services = catalog_components(&format!("{}::services", billing_namespace()));
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name(), "invoicing");
    assert_eq!(services[0].slots().len(), 2);

    let jobs = catalog_components(&format!("{}::jobs", billing_namespace()));
    assert_eq!(jobs[0].stereotypes(), &[Stereotype::Custom("job")]);
}

#[test]
fn test_derived_components_wire_through_container() -> Result<(), Box<dyn std::error::Error>> {
    use billing::jobs::BillingClock;
    use billing::persistence::InvoiceStore;
    use billing::services::InvoiceService;

    let mut container = DiContainerImpl::new();
    let report = container.build_from_namespace(&GlobalCatalogDiscovery, &billing_namespace())?;
    assert!(report.is_complete());

    let service = container.get_bean::<InvoiceService>()?;
    let store = service.store.get().ok_or("store 槽位未填充")?;
    assert_eq!(store.next_number(), 1001);
    assert!(Arc::ptr_eq(&store, &container.get_bean::<dyn InvoiceStore>()?));
    assert!(Arc::ptr_eq(
        &service.clock.get().ok_or("clock 槽位未填充")?,
        &container.get_bean::<BillingClock>()?
    ));
    Ok(())
}

#[test]
fn test_custom_stereotype_can_be_filtered_out() -> Result<(), Box<dyn std::error::Error>> {
    use billing::services::InvoiceService;

    let mut container = DiContainerImpl::builder()
        .with_filter(StereotypeFilter::services_and_repositories())
        .build();
    let report = container.build_from_namespace(&GlobalCatalogDiscovery, &billing_namespace())?;

    assert_eq!(report.registered.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.unfilled_slots.len(), 1);
    assert_eq!(report.unfilled_slots[0].field, "clock");

    let service = container.get_bean::<InvoiceService>()?;
    assert!(service.store.is_filled());
    assert!(!service.clock.is_filled());
    Ok(())
}
