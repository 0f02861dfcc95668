//! Centralized integration tests for di-impl crate

use di_abstractions::{AmbiguityPolicy, ContainerState, DiContainer, StereotypeFilter};
use di_impl::{CatalogDiscovery, DiContainerImpl, GlobalCatalogDiscovery};
use infrastructure_common::{Component, ComponentType, ConstructionError, DependencyError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod repository_scenario {
    use component_macros::Component;
    use infrastructure_common::Slot;

    #[derive(Default, Component)]
    #[component(repository)]
    pub struct Repository;

    #[derive(Default, Component)]
    #[component(service)]
    pub struct Service {
        #[inject]
        pub repository: Slot<Repository>,
    }
}

mod orphan_scenario {
    use component_macros::Component;
    use infrastructure_common::Slot;

    /// 没有组件标签，容器不会注册
    pub struct Unregistered;

    #[derive(Default, Component)]
    pub struct Orphan {
        #[inject]
        pub missing: Slot<Unregistered>,
    }
}

mod mutual_scenario {
    use component_macros::Component;
    use infrastructure_common::Slot;

    #[derive(Default, Component)]
    #[component(service)]
    pub struct Left {
        #[inject]
        pub right: Slot<Right>,
    }

    #[derive(Default, Component)]
    #[component(service)]
    pub struct Right {
        #[inject]
        pub left: Slot<Left>,
    }
}

mod notification_scenario {
    use component_macros::Component;
    use infrastructure_common::Slot;

    pub trait Notifier: Send + Sync {
        fn channel(&self) -> &'static str;
    }

    #[derive(Default, Component)]
    #[component(service)]
    #[provides(dyn Notifier)]
    pub struct EmailNotifier;

    impl Notifier for EmailNotifier {
        fn channel(&self) -> &'static str {
            "email"
        }
    }

    #[derive(Default, Component)]
    #[component(service)]
    #[provides(dyn Notifier)]
    pub struct SmsNotifier;

    impl Notifier for SmsNotifier {
        fn channel(&self) -> &'static str {
            "sms"
        }
    }

    #[derive(Default, Component)]
    #[component(controller)]
    pub struct AlertController {
        #[inject]
        pub notifier: Slot<dyn Notifier>,
    }
}

mod ordering_scenario {
    use component_macros::Component;
    use infrastructure_common::Slot;

    pub trait Mailer: Send + Sync {
        fn provider(&self) -> &'static str;
    }

    // 声明顺序与字母顺序相反
    #[derive(Default, Component)]
    #[component(service)]
    #[provides(dyn Mailer)]
    pub struct ZuluMailer;

    impl Mailer for ZuluMailer {
        fn provider(&self) -> &'static str {
            "zulu"
        }
    }

    #[derive(Default, Component)]
    #[component(service)]
    #[provides(dyn Mailer)]
    pub struct AlphaMailer;

    impl Mailer for AlphaMailer {
        fn provider(&self) -> &'static str {
            "alpha"
        }
    }

    #[derive(Default, Component)]
    #[component(service)]
    pub struct Dispatcher {
        #[inject]
        pub mailer: Slot<dyn Mailer>,
    }
}

mod failure_scenario {
    use component_macros::Component;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static HEALTHY_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Component)]
    #[component(service, constructor = "Healthy::create")]
    pub struct Healthy;

    impl Healthy {
        fn create() -> Self {
            HEALTHY_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            Healthy
        }
    }

    #[derive(Component)]
    #[component(service, try_constructor = "Refusing::connect")]
    pub struct Refusing;

    impl Refusing {
        fn connect() -> Result<Self, std::io::Error> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "连接被拒绝",
            ))
        }
    }

    #[derive(Component)]
    #[component(service, constructor = "Panicking::create")]
    pub struct Panicking;

    impl Panicking {
        fn create() -> Self {
            panic!("初始化失败")
        }
    }

    #[derive(Component)]
    #[component(service, no_constructor)]
    pub struct Abstract;
}

fn namespace(scenario: &str) -> String {
    format!("{}::{}", module_path!(), scenario)
}

#[test]
fn test_service_receives_the_registered_repository() -> anyhow::Result<()> {
    use repository_scenario::{Repository, Service};

    let mut container = DiContainerImpl::new();
    let report = container
        .build_from_namespace(&GlobalCatalogDiscovery, &namespace("repository_scenario"))?;

    assert_eq!(report.registered.len(), 2);
    assert!(report.is_complete());
    assert_eq!(container.bean_count(), 2);

    let service = container.get_bean::<Service>()?;
    let repository = container.get_bean::<Repository>()?;
    let injected = service.repository.get().expect("repository 槽位应该已填充");
    assert!(Arc::ptr_eq(&injected, &repository));
    Ok(())
}

#[test]
fn test_orphan_slot_stays_empty() -> anyhow::Result<()> {
    use orphan_scenario::{Orphan, Unregistered};

    let mut container = DiContainerImpl::new();
    let report = container
        .build_from_namespace(&GlobalCatalogDiscovery, &namespace("orphan_scenario"))?;

    assert_eq!(report.registered.len(), 1);
    assert_eq!(report.unfilled_slots.len(), 1);
    assert_eq!(report.unfilled_slots[0].field, "missing");
    assert!(!report.is_complete());

    let orphan = container.get_bean::<Orphan>()?;
    assert!(!orphan.missing.is_filled());
    assert!(matches!(
        container.get_bean::<Unregistered>(),
        Err(DependencyError::ComponentNotRegistered { .. })
    ));
    Ok(())
}

#[test]
fn test_mutual_references_are_both_filled() -> anyhow::Result<()> {
    use mutual_scenario::{Left, Right};

    let mut container = DiContainerImpl::new();
    container.build_from_namespace(&GlobalCatalogDiscovery, &namespace("mutual_scenario"))?;

    let left = container.get_bean::<Left>()?;
    let right = container.get_bean::<Right>()?;
    assert!(Arc::ptr_eq(&left.right.get().expect("left.right"), &right));
    assert!(Arc::ptr_eq(&right.left.get().expect("right.left"), &left));
    Ok(())
}

#[test]
fn test_trait_object_slot_takes_first_registered() -> anyhow::Result<()> {
    use notification_scenario::{AlertController, EmailNotifier, Notifier, SmsNotifier};

    let mut container = DiContainerImpl::new();
    container.build(vec![
        AlertController::component_type(),
        SmsNotifier::component_type(),
        EmailNotifier::component_type(),
    ])?;

    let controller = container.get_bean::<AlertController>()?;
    let notifier = controller.notifier.get().expect("notifier 槽位应该已填充");
    assert_eq!(notifier.channel(), "sms");
    assert!(Arc::ptr_eq(&notifier, &container.get_bean::<dyn Notifier>()?));

    let channels: Vec<_> = container
        .get_beans::<dyn Notifier>()
        .iter()
        .map(|notifier| notifier.channel())
        .collect();
    assert_eq!(channels, vec!["sms", "email"]);
    Ok(())
}

#[test]
fn test_namespace_build_picks_candidates_by_type_name() -> anyhow::Result<()> {
    use ordering_scenario::{Dispatcher, Mailer};

    for _ in 0..3 {
        let mut container = DiContainerImpl::new();
        container.build_from_namespace(&GlobalCatalogDiscovery, &namespace("ordering_scenario"))?;

        let dispatcher = container.get_bean::<Dispatcher>()?;
        let mailer = dispatcher.mailer.get().expect("mailer 槽位应该已填充");
        assert_eq!(mailer.provider(), "alpha");

        let providers: Vec<_> = container
            .get_beans::<dyn Mailer>()
            .iter()
            .map(|mailer| mailer.provider())
            .collect();
        assert_eq!(providers, vec!["alpha", "zulu"]);
    }
    Ok(())
}

#[test]
fn test_fail_fast_policy_reports_ambiguity() -> anyhow::Result<()> {
    use notification_scenario::{EmailNotifier, Notifier, SmsNotifier};

    // 没有歧义槽位时构建成功，歧义只在查找时报告
    let mut container = DiContainerImpl::builder()
        .ambiguity_policy(AmbiguityPolicy::FailFast)
        .build();
    container.build(vec![
        EmailNotifier::component_type(),
        SmsNotifier::component_type(),
    ])?;

    match container.get_bean::<dyn Notifier>() {
        Err(DependencyError::AmbiguousComponent { candidates, .. }) => {
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("应该返回歧义错误: {:?}", other.map(|_| ())),
    }
    assert!(container.get_bean::<SmsNotifier>().is_ok());
    Ok(())
}

#[test]
fn test_construction_failures_are_reported() -> anyhow::Result<()> {
    use failure_scenario::{Abstract, Healthy, Panicking, Refusing};

    let mut container = DiContainerImpl::new();
    let report = container.build(vec![
        Refusing::component_type(),
        Healthy::component_type(),
        Panicking::component_type(),
        Abstract::component_type(),
    ])?;

    assert_eq!(container.state(), ContainerState::Built);
    assert_eq!(report.registered.len(), 1);
    assert!(container.contains::<Healthy>());
    assert!(!container.contains::<Refusing>());

    let failures = &report.construction_failures;
    assert_eq!(failures.len(), 3);
    assert!(matches!(failures[0], ConstructionError::Failed { .. }));
    assert!(matches!(failures[1], ConstructionError::Panicked { .. }));
    assert!(matches!(failures[2], ConstructionError::MissingConstructor { .. }));

    match report.into_result() {
        Err(DependencyError::ConstructionFailed { count, .. }) => assert_eq!(count, 3),
        other => panic!("应该返回构造失败错误: {:?}", other.map(|_| ())),
    }
    Ok(())
}

#[test]
fn test_second_build_does_not_reinstantiate() -> anyhow::Result<()> {
    use failure_scenario::{Healthy, HEALTHY_CONSTRUCTIONS};

    let mut container = DiContainerImpl::new();
    let before = HEALTHY_CONSTRUCTIONS.load(Ordering::SeqCst);
    container.build(vec![Healthy::component_type()])?;
    let first = container.get_bean::<Healthy>()?;

    let err = container.build(vec![Healthy::component_type()]).unwrap_err();
    assert!(matches!(err, DependencyError::ContainerAlreadyBuilt));

    let second = container.get_bean::<Healthy>()?;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(container.bean_count(), 1);
    // 其他测试可能并发构造 Healthy，只检查本容器至少构造过一次
    assert!(HEALTHY_CONSTRUCTIONS.load(Ordering::SeqCst) > before);
    Ok(())
}

#[test]
fn test_stereotype_filter_limits_registration() -> anyhow::Result<()> {
    use notification_scenario::{AlertController, EmailNotifier};

    let discovery = CatalogDiscovery::new()
        .register::<AlertController>()
        .register::<EmailNotifier>();

    let mut container = DiContainerImpl::builder()
        .with_filter(StereotypeFilter::services_and_repositories())
        .build();
    let report = container.build_from_namespace(&discovery, "")?;

    assert_eq!(report.skipped.len(), 1);
    assert!(container.contains::<EmailNotifier>());
    assert!(!container.contains::<AlertController>());
    Ok(())
}

#[test]
fn test_built_container_is_shared_across_threads() -> anyhow::Result<()> {
    use repository_scenario::{Repository, Service};

    let mut container = DiContainerImpl::new();
    container.build(vec![
        ComponentType::of::<Service>(),
        ComponentType::of::<Repository>(),
    ])?;
    let container = Arc::new(container);
    let expected = container.get_bean::<Repository>()?;
    let lookups = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let repository = container.get_bean::<Repository>().expect("应该可以查找");
                assert!(Arc::ptr_eq(&repository, &expected));
                lookups.fetch_add(1, Ordering::SeqCst);
            });
        }
    });

    assert_eq!(lookups.load(Ordering::SeqCst), 4);
    Ok(())
}
